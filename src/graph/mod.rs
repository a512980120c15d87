//! Dependency graph over a task batch.
//!
//! Nodes are task positions in the batch; an edge `task -> dependency` means
//! "task is blocked by dependency". Ids that do not belong to the batch never
//! become edges.

pub mod cycles;
pub mod view;

pub use cycles::detect_cycles;
pub use view::{build_view, GraphEdge, GraphNode, GraphView};

use std::collections::HashMap;

use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    ids: Vec<TaskId>,
    index: HashMap<TaskId, usize>,
    depends_on: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Build the graph once per batch. When several tasks share an id, the
    /// first one is the node that id resolves to.
    pub fn build(tasks: &[Task]) -> Self {
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();

        let mut index = HashMap::with_capacity(tasks.len());
        for (i, id) in ids.iter().enumerate() {
            index.entry(*id).or_insert(i);
        }

        let mut depends_on = vec![Vec::new(); tasks.len()];
        let mut dependents = vec![Vec::new(); tasks.len()];

        for (task_idx, task) in tasks.iter().enumerate() {
            for dep_id in &task.dependencies {
                let Some(&dep_idx) = index.get(dep_id) else {
                    continue;
                };
                if depends_on[task_idx].contains(&dep_idx) {
                    continue;
                }
                depends_on[task_idx].push(dep_idx);
                if dep_idx != task_idx {
                    dependents[dep_idx].push(task_idx);
                }
            }
        }

        Self {
            ids,
            index,
            depends_on,
            dependents,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, idx: usize) -> TaskId {
        self.ids[idx]
    }

    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    /// Blockers of `idx`, in declaration order. Includes `idx` itself for a
    /// self-dependency.
    pub fn dependencies(&self, idx: usize) -> &[usize] {
        &self.depends_on[idx]
    }

    /// Other tasks blocked by `idx`.
    pub fn dependents(&self, idx: usize) -> &[usize] {
        &self.dependents[idx]
    }

    /// Number of resolved dependency ids of `task` (unknown ids excluded,
    /// repeats counted as declared).
    pub fn blocker_count(&self, task: &Task) -> usize {
        task.dependencies
            .iter()
            .filter(|id| self.contains(**id))
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.depends_on.iter().map(Vec::len).sum()
    }
}
