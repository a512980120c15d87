use anyhow::Result;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::graph::{build_view, GraphView};
use crate::scoring::{analyze_all_with, AnalyzeOptions, Strategy};
use crate::task::{ScoredTask, TaskId, TaskInput};

/// Ranked analysis of a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Sorted by priority score, highest first
    pub tasks: Vec<ScoredTask>,
    pub strategy_used: String,
    /// Titles of tasks caught in a dependency cycle
    pub circular_dependencies: Vec<String>,
    pub total_tasks: usize,
    pub dependency_graph: GraphView,
}

/// Top tasks due today.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionReport {
    pub suggestions: Vec<ScoredTask>,
    pub strategy_used: String,
    pub total_tasks_due_today: usize,
    pub message: String,
}

pub fn build_analysis_report(
    inputs: Vec<TaskInput>,
    strategy: Strategy,
    options: &AnalyzeOptions,
) -> Result<AnalysisReport> {
    if inputs.is_empty() {
        anyhow::bail!("No tasks provided");
    }

    let analysis = analyze_all_with(inputs, strategy, options);
    let circular_dependencies = circular_dependency_titles(&analysis.tasks, &analysis.cycles);
    let dependency_graph = build_view(&analysis.tasks, &analysis.cycles);

    let mut tasks = analysis.tasks;
    sort_by_priority(&mut tasks);

    Ok(AnalysisReport {
        total_tasks: tasks.len(),
        tasks,
        strategy_used: strategy.display_name().to_string(),
        circular_dependencies,
        dependency_graph,
    })
}

pub fn build_suggestions(
    inputs: Vec<TaskInput>,
    strategy: Strategy,
    limit: usize,
    options: &AnalyzeOptions,
) -> Result<SuggestionReport> {
    if inputs.is_empty() {
        anyhow::bail!("No tasks provided");
    }

    let analysis = analyze_all_with(inputs, strategy, options);

    let mut due_today: Vec<ScoredTask> = analysis
        .tasks
        .into_iter()
        .filter(|t| t.task.parsed_due() == Some(options.today))
        .collect();
    sort_by_priority(&mut due_today);

    let total_tasks_due_today = due_today.len();
    due_today.truncate(limit);

    Ok(SuggestionReport {
        message: format!(
            "Found {} task(s) due today, showing top {}",
            total_tasks_due_today,
            due_today.len()
        ),
        suggestions: due_today,
        strategy_used: strategy.display_name().to_string(),
        total_tasks_due_today,
    })
}

/// Titles of cycle members, in batch order.
pub fn circular_dependency_titles(tasks: &[ScoredTask], cycles: &BTreeSet<TaskId>) -> Vec<String> {
    tasks
        .iter()
        .filter(|t| cycles.contains(&t.task.id))
        .map(|t| t.task.title.clone())
        .collect()
}

// Stable: equal scores keep batch order.
fn sort_by_priority(tasks: &mut [ScoredTask]) {
    tasks.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(Ordering::Equal)
    });
}
