pub mod types;
pub mod validation;

pub use types::{
    normalize, DueDateInput, ScoredTask, Task, TaskId, TaskInput, DEFAULT_DUE_HORIZON_DAYS,
};
pub use validation::validate_batch;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

/// A batch of tasks as read from a file, with the strategy it asks for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskBatch {
    #[serde(default)]
    pub tasks: Vec<TaskInput>,
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Bare(Vec<TaskInput>),
    Wrapped(TaskBatch),
}

/// Parse a batch from JSON: either a bare array of tasks or
/// `{"tasks": [...], "strategy": "..."}`.
pub fn parse_batch(json: &str) -> Result<TaskBatch> {
    let file: BatchFile = serde_json::from_str(json)
        .context("Expected a JSON array of tasks or an object with a \"tasks\" array")?;
    Ok(match file {
        BatchFile::Bare(tasks) => TaskBatch {
            tasks,
            strategy: None,
        },
        BatchFile::Wrapped(batch) => batch,
    })
}

/// Load a task batch from a JSON file, or from stdin when `path` is `None`
/// or `-`.
pub fn load_tasks(path: Option<&Path>) -> Result<TaskBatch> {
    match path {
        Some(p) if p != Path::new("-") => {
            let content = fs::read_to_string(p)
                .with_context(|| format!("Failed to read task file at {}", p.display()))?;
            parse_batch(&content)
                .with_context(|| format!("Failed to parse tasks in {}", p.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read tasks from stdin")?;
            parse_batch(&content).context("Failed to parse tasks from stdin")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_bare_array() {
        let batch = parse_batch(r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        assert_eq!(batch.tasks.len(), 2);
        assert!(batch.strategy.is_none());
    }

    #[test]
    fn test_parse_wrapped_object() {
        let batch =
            parse_batch(r#"{"tasks": [{"title": "A"}], "strategy": "fastest_wins"}"#).unwrap();
        assert_eq!(batch.tasks.len(), 1);
        assert_eq!(batch.strategy.as_deref(), Some("fastest_wins"));
    }

    #[test]
    fn test_parse_empty_array() {
        let batch = parse_batch("[]").unwrap();
        assert!(batch.tasks.is_empty());
    }

    #[test]
    fn test_parse_rejects_scalar() {
        assert!(parse_batch("42").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("taskrank_test_missing_tasks.json");
        let _ = fs::remove_file(&path);
        let err = load_tasks(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read task file"));
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join("taskrank_test_load_tasks.json");
        fs::write(&path, r#"{"tasks": [{"title": "From file", "id": 3}]}"#).unwrap();

        let batch = load_tasks(Some(&path)).unwrap();
        assert_eq!(batch.tasks[0].id, Some(3));

        let _ = fs::remove_file(&path);
    }
}
