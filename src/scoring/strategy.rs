use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

use super::engine::{calculate_score, DueFacts};
use super::factors::{EffortStep, StrategyProfile, UrgencyTiers};
use crate::task::Task;

/// Weighting scheme that decides how deadline, importance and effort combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Balanced weighting, and the fallback for unknown names
    #[default]
    SmartBalance,
    DeadlineDriven,
    FastestWins,
    HighImpact,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::DeadlineDriven,
        Strategy::FastestWins,
        Strategy::HighImpact,
    ];

    /// Exact match on the machine key (`smart_balance`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == name)
    }

    /// Total lookup: unknown names fall back to `SmartBalance`.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!(strategy = name, "unknown strategy, using smart_balance");
            Strategy::SmartBalance
        })
    }

    pub fn key(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::DeadlineDriven => "deadline_driven",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "Smart Balance",
            Strategy::DeadlineDriven => "Deadline Driven",
            Strategy::FastestWins => "Fastest Wins",
            Strategy::HighImpact => "High Impact",
        }
    }

    /// Base score of `task` under this strategy.
    pub fn score(&self, task: &Task, facts: &DueFacts) -> f64 {
        calculate_score(task, *self, facts).score
    }

    pub fn profile(&self) -> &'static StrategyProfile {
        match self {
            Strategy::SmartBalance => &SMART_BALANCE,
            Strategy::DeadlineDriven => &DEADLINE_DRIVEN,
            Strategy::FastestWins => &FASTEST_WINS,
            Strategy::HighImpact => &HIGH_IMPACT,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Strategy::from_name(&name))
    }
}

const TWO_STEP_EFFORT_15: &[EffortStep] = &[
    EffortStep { max_hours: 1.0, bonus: 15.0 },
    EffortStep { max_hours: 3.0, bonus: 5.0 },
];

const TWO_STEP_EFFORT_10: &[EffortStep] = &[
    EffortStep { max_hours: 1.0, bonus: 10.0 },
    EffortStep { max_hours: 3.0, bonus: 5.0 },
];

static SMART_BALANCE: StrategyProfile = StrategyProfile {
    urgency: UrgencyTiers {
        overdue_base: 100.0,
        overdue_per_day: 5.0,
        overdue_cap: 50.0,
        due_today_working: 90.0,
        due_today_off: 100.0,
        within_one: 80.0,
        within_three: 60.0,
        within_week: 40.0,
        horizon_base: 25,
        horizon_divisor: 5,
    },
    weekend_bonus: Some(5.0),
    importance_weight: 6.0,
    effort: TWO_STEP_EFFORT_15,
};

static DEADLINE_DRIVEN: StrategyProfile = StrategyProfile {
    urgency: UrgencyTiers {
        overdue_base: 150.0,
        overdue_per_day: 5.0,
        overdue_cap: 50.0,
        due_today_working: 120.0,
        due_today_off: 130.0,
        within_one: 100.0,
        within_three: 80.0,
        within_week: 60.0,
        horizon_base: 40,
        horizon_divisor: 3,
    },
    weekend_bonus: Some(5.0),
    importance_weight: 3.0,
    effort: TWO_STEP_EFFORT_10,
};

// Flatter deadline tiers, no working-day split for "due today", and the
// richest quick-win ladder.
static FASTEST_WINS: StrategyProfile = StrategyProfile {
    urgency: UrgencyTiers {
        overdue_base: 80.0,
        overdue_per_day: 3.0,
        overdue_cap: 40.0,
        due_today_working: 70.0,
        due_today_off: 70.0,
        within_one: 60.0,
        within_three: 40.0,
        within_week: 25.0,
        horizon_base: 15,
        horizon_divisor: 7,
    },
    weekend_bonus: None,
    importance_weight: 4.0,
    effort: &[
        EffortStep { max_hours: 1.0, bonus: 40.0 },
        EffortStep { max_hours: 2.0, bonus: 25.0 },
        EffortStep { max_hours: 3.0, bonus: 15.0 },
        EffortStep { max_hours: 5.0, bonus: 5.0 },
    ],
};

static HIGH_IMPACT: StrategyProfile = StrategyProfile {
    urgency: UrgencyTiers {
        overdue_base: 90.0,
        overdue_per_day: 4.0,
        overdue_cap: 40.0,
        due_today_working: 80.0,
        due_today_off: 85.0,
        within_one: 70.0,
        within_three: 50.0,
        within_week: 30.0,
        horizon_base: 20,
        horizon_divisor: 5,
    },
    weekend_bonus: Some(5.0),
    importance_weight: 10.0,
    effort: TWO_STEP_EFFORT_10,
};
