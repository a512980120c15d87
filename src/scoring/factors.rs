use super::engine::DueFacts;

/// Deadline step function: overdue > due today > <=1 > <=3 > <=7 working
/// days > further out, where "further out" decays with working days left.
#[derive(Debug, Clone)]
pub struct UrgencyTiers {
    pub overdue_base: f64,
    pub overdue_per_day: f64,
    pub overdue_cap: f64,
    /// Due today and today is a working day
    pub due_today_working: f64,
    /// Due today on a weekend or holiday
    pub due_today_off: f64,
    pub within_one: f64,
    pub within_three: f64,
    pub within_week: f64,
    pub horizon_base: i64,
    pub horizon_divisor: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyTier {
    Overdue { days: i64 },
    DueToday { working_day: bool },
    WithinOne,
    WithinThree,
    WithinWeek,
    Horizon { working_days: i64 },
}

impl UrgencyTier {
    pub fn classify(facts: &DueFacts) -> Self {
        if facts.days_until_due < 0 {
            UrgencyTier::Overdue {
                days: facts.days_until_due.abs(),
            }
        } else if facts.days_until_due == 0 {
            UrgencyTier::DueToday {
                working_day: facts.today_is_working,
            }
        } else if facts.working_days_left <= 1 {
            UrgencyTier::WithinOne
        } else if facts.working_days_left <= 3 {
            UrgencyTier::WithinThree
        } else if facts.working_days_left <= 7 {
            UrgencyTier::WithinWeek
        } else {
            UrgencyTier::Horizon {
                working_days: facts.working_days_left,
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            UrgencyTier::Overdue { days } => format!("overdue by {} days", days),
            UrgencyTier::DueToday { working_day: true } => "due today".to_string(),
            UrgencyTier::DueToday { working_day: false } => {
                "due today (weekend/holiday)".to_string()
            }
            UrgencyTier::WithinOne => "<=1 working day left".to_string(),
            UrgencyTier::WithinThree => "<=3 working days left".to_string(),
            UrgencyTier::WithinWeek => "<=7 working days left".to_string(),
            UrgencyTier::Horizon { working_days } => {
                format!("{} working days left", working_days)
            }
        }
    }
}

impl UrgencyTiers {
    pub fn points(&self, tier: UrgencyTier) -> f64 {
        match tier {
            UrgencyTier::Overdue { days } => {
                self.overdue_base + (days as f64 * self.overdue_per_day).min(self.overdue_cap)
            }
            UrgencyTier::DueToday { working_day: true } => self.due_today_working,
            UrgencyTier::DueToday { working_day: false } => self.due_today_off,
            UrgencyTier::WithinOne => self.within_one,
            UrgencyTier::WithinThree => self.within_three,
            UrgencyTier::WithinWeek => self.within_week,
            UrgencyTier::Horizon { working_days } => {
                let decay = working_days.max(0) / self.horizon_divisor.max(1);
                (self.horizon_base - decay).max(0) as f64
            }
        }
    }
}

/// One rung of a quick-win ladder: tasks up to `max_hours` earn `bonus`.
#[derive(Debug, Clone)]
pub struct EffortStep {
    pub max_hours: f64,
    pub bonus: f64,
}

/// First matching rung wins. Non-positive estimates never qualify.
pub fn effort_bonus(ladder: &[EffortStep], hours: f64) -> Option<&EffortStep> {
    if hours.is_nan() || hours <= 0.0 {
        return None;
    }
    ladder.iter().find(|step| hours <= step.max_hours)
}

/// All constants that make up one strategy.
#[derive(Debug, Clone)]
pub struct StrategyProfile {
    pub urgency: UrgencyTiers,
    /// Added when the due date is a weekend and not yet passed
    pub weekend_bonus: Option<f64>,
    pub importance_weight: f64,
    pub effort: &'static [EffortStep],
}
