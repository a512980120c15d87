use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::factors::{effort_bonus, UrgencyTier};
use super::strategy::Strategy;
use crate::calendar::{self, Holidays};
use crate::task::Task;

/// Calendar facts about one task's deadline, relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueFacts {
    pub today: NaiveDate,
    /// Parsed due date, or today + 30 days when absent/unparsable
    pub due: NaiveDate,
    /// False when `due` is the default horizon
    pub due_known: bool,
    /// Signed calendar days; negative when overdue
    pub days_until_due: i64,
    pub working_days_left: i64,
    pub today_is_working: bool,
    pub due_on_weekend: bool,
}

impl DueFacts {
    pub fn for_task(task: &Task, today: NaiveDate) -> Self {
        let due = task.effective_due(today);
        let holidays = holidays_spanning(today, due);
        Self::for_task_with(task, today, &holidays)
    }

    /// Same as [`DueFacts::for_task`], reading holidays from a set shared
    /// across a batch.
    pub fn for_task_with(task: &Task, today: NaiveDate, holidays: &Holidays) -> Self {
        let parsed = task.parsed_due();
        if parsed.is_none() {
            debug!(task = task.id, "no usable due date, using default horizon");
        }
        let due = parsed.unwrap_or_else(|| task.effective_due(today));
        Self::new_with(due, parsed.is_some(), today, holidays)
    }

    pub fn new(due: NaiveDate, due_known: bool, today: NaiveDate) -> Self {
        Self::new_with(due, due_known, today, &holidays_spanning(today, due))
    }

    pub fn new_with(
        due: NaiveDate,
        due_known: bool,
        today: NaiveDate,
        holidays: &Holidays,
    ) -> Self {
        Self {
            today,
            due,
            due_known,
            days_until_due: calendar::days_between(today, due),
            working_days_left: calendar::working_days_remaining_with(due, today, holidays),
            today_is_working: calendar::is_working_day(today, Some(holidays)),
            due_on_weekend: calendar::is_weekend(due),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.days_until_due < 0
    }
}

fn holidays_spanning(a: NaiveDate, b: NaiveDate) -> Holidays {
    Holidays::for_years(a.year().min(b.year())..=a.year().max(b.year()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Urgency", "Importance", "Effort"
    pub description: String, // e.g. "due today", "8 x 6"
    pub before: f64,         // Score before this factor
    pub after: f64,          // Score after this factor
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one task under `strategy` from its precomputed deadline facts.
///
/// Urgency tier, weekend-due bonus, importance weight and quick-win bonus are
/// added in that order. The result is always finite and non-negative.
pub fn calculate_score(task: &Task, strategy: Strategy, facts: &DueFacts) -> ScoreResult {
    let profile = strategy.profile();
    let mut score = 0.0;
    let mut factors = Vec::new();

    let tier = UrgencyTier::classify(facts);
    let before = score;
    score += profile.urgency.points(tier);
    factors.push(FactorContribution {
        label: "Urgency".to_string(),
        description: tier.describe(),
        before,
        after: score,
    });

    if let Some(bonus) = profile.weekend_bonus {
        if facts.due_on_weekend && facts.days_until_due > 0 {
            let before = score;
            score += bonus;
            factors.push(FactorContribution {
                label: "Weekend due".to_string(),
                description: format!("due on {} -> {:+}", facts.due.format("%A"), bonus),
                before,
                after: score,
            });
        }
    }

    let importance = task.clamped_importance();
    let before = score;
    score += importance as f64 * profile.importance_weight;
    factors.push(FactorContribution {
        label: "Importance".to_string(),
        description: format!("{} x {}", importance, profile.importance_weight),
        before,
        after: score,
    });

    if let Some(step) = effort_bonus(profile.effort, task.estimated_hours) {
        let before = score;
        score += step.bonus;
        factors.push(FactorContribution {
            label: "Effort".to_string(),
            description: format!(
                "{}h, matched '<={}h' -> {:+}",
                task.estimated_hours, step.max_hours, step.bonus
            ),
            before,
            after: score,
        });
    }

    ScoreResult {
        score: round2(score),
        breakdown: ScoreBreakdown { factors },
    }
}

/// Base score of one task, as of `today`.
pub fn base_score(task: &Task, strategy: Strategy, today: NaiveDate) -> f64 {
    calculate_score(task, strategy, &DueFacts::for_task(task, today)).score
}
