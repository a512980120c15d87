use std::collections::BTreeSet;

use super::DependencyGraph;
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Indices of every task on, or leading into, a dependency cycle.
///
/// Depth-first over `task -> dependency` edges with an explicit stack. When
/// an edge reaches an in-progress node, that node and the whole active path
/// are marked, and the walk from the current root stops. Nodes on an
/// abandoned path stay in-progress, so a later walk that runs into one of
/// them is marked as well.
pub fn cycle_members(graph: &DependencyGraph) -> BTreeSet<usize> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut members = BTreeSet::new();

    for root in 0..graph.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        marks[root] = Mark::InProgress;
        // (node, position of the next dependency to look at)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(&(node, next)) = stack.last() {
            let Some(&neighbor) = graph.dependencies(node).get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };

            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            match marks[neighbor] {
                Mark::Unvisited => {
                    marks[neighbor] = Mark::InProgress;
                    stack.push((neighbor, 0));
                }
                Mark::InProgress => {
                    members.insert(neighbor);
                    members.extend(stack.iter().map(|(n, _)| *n));
                    stack.clear();
                }
                Mark::Done => {}
            }
        }
    }

    members
}

/// Ids of every task on, or leading into, a dependency cycle.
pub fn detect_cycles(tasks: &[Task]) -> BTreeSet<TaskId> {
    let graph = DependencyGraph::build(tasks);
    cycle_members(&graph)
        .into_iter()
        .map(|idx| graph.id(idx))
        .collect()
}
