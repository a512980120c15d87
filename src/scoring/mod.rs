pub mod engine;
pub mod explain;
pub mod factors;
pub mod propagation;
pub mod strategy;

pub use engine::{base_score, calculate_score, round2, DueFacts, ScoreBreakdown, ScoreResult};
pub use explain::{explain, explanation_reasons, generate_explanation};
pub use factors::{EffortStep, StrategyProfile, UrgencyTier, UrgencyTiers};
pub use propagation::{
    analyze_all, analyze_all_with, propagate, Analysis, AnalyzeOptions, CYCLE_SCORE,
    CYCLE_WARNING,
};
pub use strategy::Strategy;
