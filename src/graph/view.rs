use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::task::{ScoredTask, TaskId};

/// Node/edge structure for rendering the dependency graph.
///
/// Edges point from the blocker to the task it blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: TaskId,
    pub title: String,
    pub score: f64,
    pub is_circular: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: TaskId,
    pub to: TaskId,
    /// Both endpoints are cycle members
    pub is_circular: bool,
}

pub fn build_view(tasks: &[ScoredTask], cycles: &BTreeSet<TaskId>) -> GraphView {
    let known: HashSet<TaskId> = tasks.iter().map(|t| t.task.id).collect();

    let nodes = tasks
        .iter()
        .map(|t| GraphNode {
            id: t.task.id,
            title: t.task.title.clone(),
            score: t.priority_score,
            is_circular: cycles.contains(&t.task.id),
        })
        .collect();

    let mut edges = Vec::new();
    for t in tasks {
        let mut seen = HashSet::new();
        for dep in t.task.dependencies.iter().filter(|d| known.contains(d)) {
            if !seen.insert(*dep) {
                continue;
            }
            edges.push(GraphEdge {
                from: *dep,
                to: t.task.id,
                is_circular: cycles.contains(&t.task.id) && cycles.contains(dep),
            });
        }
    }

    GraphView { nodes, edges }
}
