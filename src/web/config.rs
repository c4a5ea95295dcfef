use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::catalog::{default_groups, GroupSpec};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Service configuration. Every field has a default, so running without a
/// config file is fine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Where element sets come from and how often they go stale.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    /// Feed groups, in the order they are fetched and listed.
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupSpec>,
    /// Groups force-loaded at startup before the server accepts requests.
    #[serde(default = "default_initial_groups")]
    pub initial_groups: Vec<String>,
    /// Catalog age below which unforced refreshes are served from cache.
    #[serde(
        default = "default_cache_max_age",
        deserialize_with = "deserialize_duration"
    )]
    pub cache_max_age: Duration,
    #[serde(
        default = "default_fetch_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub fetch_timeout: Duration,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            groups: default_groups(),
            initial_groups: default_initial_groups(),
            cache_max_age: default_cache_max_age(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

fn default_initial_groups() -> Vec<String> {
    vec!["space_stations".to_string()]
}

fn default_cache_max_age() -> Duration {
    Duration::from_secs(6 * 60 * 60)
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Limits for bulk constellation evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    #[serde(default = "default_max_satellites")]
    pub max_satellites: usize,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(
        default = "default_task_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub task_timeout: Duration,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_satellites: default_max_satellites(),
            max_workers: default_max_workers(),
            task_timeout: default_task_timeout(),
        }
    }
}

fn default_max_satellites() -> usize {
    50
}

fn default_max_workers() -> usize {
    10
}

fn default_task_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Accepts humantime strings like "6h" or "30s".
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.feeds.groups.len(), 7);
        assert_eq!(config.feeds.groups[0].key, "space_stations");
        assert_eq!(config.feeds.initial_groups, vec!["space_stations"]);
        assert_eq!(config.feeds.cache_max_age, Duration::from_secs(21600));
        assert_eq!(config.feeds.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.evaluation.max_satellites, 50);
        assert_eq!(config.evaluation.max_workers, 10);
        assert_eq!(config.evaluation.task_timeout, Duration::from_secs(5));
    }

    #[test]
    fn durations_accept_humantime_strings() {
        let yaml = r#"
feeds:
  cache_max_age: 2h 30m
  fetch_timeout: 45s
evaluation:
  task_timeout: 1500ms
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.feeds.cache_max_age, Duration::from_secs(9000));
        assert_eq!(config.feeds.fetch_timeout, Duration::from_secs(45));
        assert_eq!(config.evaluation.task_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn custom_group_list_replaces_defaults() {
        let yaml = r#"
feeds:
  groups:
    - key: cubesats
      name: CubeSats
      url: https://celestrak.org/NORAD/elements/gp.php?GROUP=cubesat&FORMAT=tle
  initial_groups: [cubesats]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.feeds.groups.len(), 1);
        assert_eq!(config.feeds.groups[0].key, "cubesats");
        assert_eq!(config.feeds.groups[0].name, "CubeSats");
        assert_eq!(config.feeds.initial_groups, vec!["cubesats"]);
    }

    #[test]
    fn bad_duration_string_is_rejected() {
        let yaml = "feeds:\n  cache_max_age: six hours\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }
}
