use serde::{Deserialize, Serialize};

use crate::scoring::Strategy;

pub const DEFAULT_SUGGEST_LIMIT: usize = 3;

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// strategy: deadline_driven
/// suggest_limit: 5
/// parallel: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Strategy used when none is given on the command line or in the task file
    #[serde(default)]
    pub strategy: Option<String>,

    /// Number of "due today" suggestions (default: 3)
    #[serde(default)]
    pub suggest_limit: Option<usize>,

    /// Relax tasks in parallel during propagation (default: false)
    #[serde(default)]
    pub parallel: Option<bool>,
}

impl Config {
    pub fn strategy(&self) -> Strategy {
        self.strategy
            .as_deref()
            .map(Strategy::from_name)
            .unwrap_or_default()
    }

    pub fn suggest_limit(&self) -> usize {
        self.suggest_limit.unwrap_or(DEFAULT_SUGGEST_LIMIT)
    }

    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }
}
