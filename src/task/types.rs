use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type TaskId = i64;

/// Days added to "today" when a task has no usable due date.
pub const DEFAULT_DUE_HORIZON_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A due date as supplied by the caller.
///
/// Strings that parse as `YYYY-MM-DD` become `Date`; anything else is kept
/// verbatim as `Text` and treated as "no usable due date" by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DueDateInput {
    Date(NaiveDate),
    Text(String),
}

impl DueDateInput {
    pub fn parse(&self) -> Option<NaiveDate> {
        match self {
            DueDateInput::Date(d) => Some(*d),
            DueDateInput::Text(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
        }
    }
}

impl From<NaiveDate> for DueDateInput {
    fn from(date: NaiveDate) -> Self {
        DueDateInput::Date(date)
    }
}

impl From<&str> for DueDateInput {
    fn from(s: &str) -> Self {
        match NaiveDate::parse_from_str(s, DATE_FORMAT) {
            Ok(d) => DueDateInput::Date(d),
            Err(_) => DueDateInput::Text(s.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for DueDateInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => DueDateInput::from(s.as_str()),
            other => DueDateInput::Text(other.to_string()),
        })
    }
}

/// A task record as it arrives from the caller. Every field is optional and
/// wrongly-typed values degrade to "absent" instead of failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskInput {
    #[serde(deserialize_with = "lenient_integer")]
    pub id: Option<TaskId>,

    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,

    pub due_date: Option<DueDateInput>,

    /// Intended range 1-10; clamped when scoring
    #[serde(deserialize_with = "lenient_integer")]
    pub importance: Option<i64>,

    #[serde(deserialize_with = "lenient_number")]
    pub estimated_hours: Option<f64>,

    /// Ids of tasks that must happen before this one
    #[serde(deserialize_with = "lenient_dependencies")]
    pub dependencies: Vec<TaskId>,
}

impl TaskInput {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_due(mut self, due: impl Into<DueDateInput>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<TaskId>) -> Self {
        self.dependencies = deps;
        self
    }

    /// The id this record ends up with at `position` in its batch.
    pub fn resolved_id(&self, position: usize) -> TaskId {
        self.id.unwrap_or(position as TaskId)
    }
}

/// Integral JSON numbers only: `2` and `2.0` are ids, `1.5` is not.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

fn lenient_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(as_integer))
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_dependencies<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<TaskId>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items.iter().filter_map(as_integer).collect(),
        _ => Vec::new(),
    })
}

/// A task after id, title and dependency normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub due_date: Option<DueDateInput>,
    pub importance: i64,
    pub estimated_hours: f64,
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Normalize one input record. `position` is its index in the batch and
    /// becomes the id when none was given.
    pub fn from_input(input: TaskInput, position: usize) -> Self {
        let id = input.resolved_id(position);
        Self {
            id,
            title: input.title.unwrap_or_else(|| format!("Task {}", id)),
            due_date: input.due_date,
            importance: input.importance.unwrap_or(5),
            estimated_hours: input.estimated_hours.unwrap_or(1.0),
            dependencies: input.dependencies,
        }
    }

    /// The parsed due date, if one was supplied and is valid.
    pub fn parsed_due(&self) -> Option<NaiveDate> {
        self.due_date.as_ref().and_then(DueDateInput::parse)
    }

    /// The due date used for scoring: the parsed date or `today + 30 days`.
    pub fn effective_due(&self, today: NaiveDate) -> NaiveDate {
        self.parsed_due()
            .unwrap_or_else(|| today + Duration::days(DEFAULT_DUE_HORIZON_DAYS))
    }

    pub fn clamped_importance(&self) -> i64 {
        self.importance.clamp(1, 10)
    }
}

/// Normalize a whole batch, assigning positional ids where missing.
pub fn normalize(inputs: Vec<TaskInput>) -> Vec<Task> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| Task::from_input(input, i))
        .collect()
}

/// A task enriched with its scores and explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub raw_score: f64,
    pub priority_score: f64,
    pub explanation: String,
}
