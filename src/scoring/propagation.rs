use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::engine::{calculate_score, round2, DueFacts, ScoreResult};
use super::explain::describe;
use super::strategy::Strategy;
use crate::calendar::{self, Holidays};
use crate::graph::{cycles::cycle_members, DependencyGraph};
use crate::task::{normalize, ScoredTask, Task, TaskId, TaskInput};

/// Maximum relaxation rounds; propagation stops earlier at a fixed point.
pub const PROPAGATION_ROUNDS: usize = 3;
/// Share of a dependent's score inherited by each of its blockers.
pub const DEPENDENT_SHARE: f64 = 0.5;
/// Propagated scores must stay strictly below this.
pub const SCORE_CEILING: f64 = 1000.0;
pub const CYCLE_SCORE: f64 = 999.0;
pub const CYCLE_WARNING: &str = "CIRCULAR DEPENDENCY DETECTED - Resolve Immediately";

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Reference date for all deadline arithmetic
    pub today: NaiveDate,
    /// Relax tasks within a round in parallel
    pub parallel: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::on(calendar::today())
    }
}

impl AnalyzeOptions {
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Result of analyzing one batch.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Enriched tasks, in input order
    pub tasks: Vec<ScoredTask>,
    /// Ids of tasks on, or leading into, a dependency cycle
    pub cycles: BTreeSet<TaskId>,
}

/// Per-task output of the base-scoring stage.
struct BaseStage {
    result: ScoreResult,
    explanation: String,
}

/// Score a batch as of today.
pub fn analyze_all(inputs: Vec<TaskInput>, strategy: Strategy) -> Analysis {
    analyze_all_with(inputs, strategy, &AnalyzeOptions::default())
}

/// Normalize, base-score, propagate urgency to blockers, then neutralize
/// cycles and annotate explanations.
pub fn analyze_all_with(
    inputs: Vec<TaskInput>,
    strategy: Strategy,
    options: &AnalyzeOptions,
) -> Analysis {
    if inputs.is_empty() {
        return Analysis::default();
    }

    let tasks = normalize(inputs);
    let holidays = batch_holidays(&tasks, options.today);

    let base: Vec<BaseStage> = tasks
        .iter()
        .map(|task| {
            let facts = DueFacts::for_task_with(task, options.today, &holidays);
            BaseStage {
                result: calculate_score(task, strategy, &facts),
                explanation: describe(task, strategy, &facts),
            }
        })
        .collect();

    let graph = DependencyGraph::build(&tasks);
    let cycles: BTreeSet<TaskId> = cycle_members(&graph)
        .into_iter()
        .map(|idx| graph.id(idx))
        .collect();
    if !cycles.is_empty() {
        info!(count = cycles.len(), "circular dependencies detected");
    }

    let raw: Vec<f64> = base.iter().map(|b| b.result.score).collect();
    let priority = propagate(&graph, &raw, options.parallel);

    let scored = tasks
        .into_iter()
        .zip(base)
        .zip(priority)
        .map(|((task, stage), priority)| {
            finalize(task, stage.result.score, priority, stage.explanation, &graph, &cycles)
        })
        .collect();

    Analysis {
        tasks: scored,
        cycles,
    }
}

/// Holidays for every year between today and the batch's furthest deadline,
/// computed once and shared by all tasks.
fn batch_holidays(tasks: &[Task], today: NaiveDate) -> Holidays {
    let (first, last) = tasks
        .iter()
        .map(|t| t.effective_due(today).year())
        .fold((today.year(), today.year()), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Holidays::for_years(first..=last)
}

/// Bounded relaxation of priority scores over the dependency graph.
///
/// Each round reads only the previous round's scores: a blocker's candidate
/// is its raw score plus half of every dependent's score. Scores only ever
/// rise and never reach [`SCORE_CEILING`].
pub fn propagate(graph: &DependencyGraph, raw: &[f64], parallel: bool) -> Vec<f64> {
    let mut priority = raw.to_vec();

    for round in 1..=PROPAGATION_ROUNDS {
        let snapshot = priority.clone();

        let relax = |idx: usize| -> Option<f64> {
            let inherited: f64 = graph
                .dependents(idx)
                .iter()
                .map(|&d| snapshot[d] * DEPENDENT_SHARE)
                .sum();
            if inherited <= 0.0 {
                return None;
            }
            let candidate = raw[idx] + inherited;
            (candidate > snapshot[idx] && candidate < SCORE_CEILING).then(|| round2(candidate))
        };

        let updates: Vec<Option<f64>> = if parallel {
            (0..graph.len()).into_par_iter().map(&relax).collect()
        } else {
            (0..graph.len()).map(&relax).collect()
        };

        let mut changed = false;
        for (idx, update) in updates.into_iter().enumerate() {
            if let Some(score) = update {
                priority[idx] = score;
                changed = true;
            }
        }

        debug!(round, changed, "propagation round");
        if !changed {
            break;
        }
    }

    priority
}

fn finalize(
    task: Task,
    raw_score: f64,
    priority_score: f64,
    base_explanation: String,
    graph: &DependencyGraph,
    cycles: &BTreeSet<TaskId>,
) -> ScoredTask {
    if cycles.contains(&task.id) {
        return ScoredTask {
            task,
            raw_score,
            priority_score: CYCLE_SCORE,
            explanation: CYCLE_WARNING.to_string(),
        };
    }

    let mut explanation = base_explanation;

    let blockers = graph.blocker_count(&task);
    if blockers > 0 {
        explanation = format!("Blocked by {} task(s). {}", blockers, explanation);
    }

    if priority_score > raw_score + 1.0 {
        let boost = (priority_score - raw_score) as i64;
        explanation.push_str(&format!(
            " (Includes +{}pts from downstream dependencies)",
            boost
        ));
    }

    ScoredTask {
        task,
        raw_score,
        priority_score,
        explanation,
    }
}
