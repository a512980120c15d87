mod schema;

pub use schema::{Config, DEFAULT_SUGGEST_LIMIT};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::Strategy;

/// Get the config directory path (~/.config/taskrank/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("taskrank"))
}

/// Get the default config file path (~/.config/taskrank/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/taskrank/config.yaml) and falls back to defaults when it is
///   absent.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref name) = config.strategy {
        if Strategy::parse(name).is_none() {
            let known: Vec<&str> = Strategy::ALL.iter().map(|s| s.key()).collect();
            errors.push(format!(
                "strategy: unknown '{}' - expected one of {}",
                name,
                known.join(", ")
            ));
        }
    }

    if config.suggest_limit == Some(0) {
        errors.push("suggest_limit: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file() {
        let path = env::temp_dir().join("taskrank_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = env::temp_dir().join("taskrank_test_config.yaml");
        fs::write(&path, "strategy: high_impact\nsuggest_limit: 4\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.strategy(), Strategy::HighImpact);
        assert_eq!(config.suggest_limit(), 4);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("taskrank_test_bad_config.yaml");
        fs::write(&path, "suggest_limit: [not, a, number]\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_valid_config() {
        let config = Config {
            strategy: Some("deadline_driven".to_string()),
            suggest_limit: Some(3),
            parallel: Some(true),
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_unknown_strategy() {
        let config = Config {
            strategy: Some("yolo".to_string()),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("strategy: unknown 'yolo'"));
        assert!(errors[0].contains("fastest_wins"));
    }

    #[test]
    fn test_zero_suggest_limit() {
        let config = Config {
            suggest_limit: Some(0),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["suggest_limit: must be at least 1".to_string()]);
    }
}
