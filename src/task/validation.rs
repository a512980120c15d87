use std::collections::HashSet;

use super::types::TaskInput;

const MAX_TITLE_LEN: usize = 200;

/// Validate a task batch before analysis.
/// Returns all validation errors at once (not just the first).
pub fn validate_batch(tasks: &[TaskInput]) -> Result<(), Vec<String>> {
    if tasks.is_empty() {
        return Err(vec!["No tasks provided".to_string()]);
    }

    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, task) in tasks.iter().enumerate() {
        match task.title.as_deref().map(str::trim) {
            None | Some("") => errors.push(format!("tasks[{}].title: required", i)),
            Some(title) if title.chars().count() > MAX_TITLE_LEN => errors.push(format!(
                "tasks[{}].title: must be at most {} characters",
                i, MAX_TITLE_LEN
            )),
            Some(_) => {}
        }

        match &task.due_date {
            None => errors.push(format!("tasks[{}].due_date: required", i)),
            Some(due) if due.parse().is_none() => errors.push(format!(
                "tasks[{}].due_date: invalid date {:?}, expected YYYY-MM-DD",
                i, due
            )),
            Some(_) => {}
        }

        if let Some(hours) = task.estimated_hours {
            if hours < 1.0 {
                errors.push(format!(
                    "tasks[{}].estimated_hours: must be at least 1 (got {})",
                    i, hours
                ));
            }
        }

        if let Some(importance) = task.importance {
            if !(1..=10).contains(&importance) {
                errors.push(format!(
                    "tasks[{}].importance: must be between 1 and 10 (got {})",
                    i, importance
                ));
            }
        }

        // Missing ids become the task's position, so those count too
        let id = task.resolved_id(i);
        if !seen_ids.insert(id) {
            errors.push(format!("tasks[{}].id: duplicate id {}", i, id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
