//! Synthesis retry policy from TOML (`[retry]` section)

use research_application::{InvalidRetryPolicy, RetryPolicy};
use research_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw retry configuration from TOML
///
/// ```toml
/// [retry]
/// max_retries = 3        # total attempts
/// base_delay_secs = 10.0 # doubled after every failed attempt
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_retries: u32,
    pub base_delay_secs: f64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            base_delay_secs: policy.base_delay.as_secs_f64(),
        }
    }
}

impl FileRetryConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_retries < 1 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidRetry {
                    field: "max_retries",
                },
                "retry.max_retries must be at least 1",
            ));
        }
        if !self.base_delay_secs.is_finite() || self.base_delay_secs <= 0.0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidRetry {
                    field: "base_delay_secs",
                },
                format!(
                    "retry.base_delay_secs must be a positive number of seconds (got {})",
                    self.base_delay_secs
                ),
            ));
        }
        issues
    }

    pub fn to_retry_policy(&self) -> Result<RetryPolicy, InvalidRetryPolicy> {
        let delay = Duration::try_from_secs_f64(self.base_delay_secs)
            .map_err(|_| InvalidRetryPolicy::ZeroDelay)?;
        RetryPolicy::new(self.max_retries, delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_delay() {
        let config: FileRetryConfig =
            toml::from_str("max_retries = 5\nbase_delay_secs = 0.5").unwrap();
        let policy = config.to_retry_policy().unwrap();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_non_positive_values_are_reported() {
        let config = FileRetryConfig {
            max_retries: 0,
            base_delay_secs: -1.0,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
        assert!(config.to_retry_policy().is_err());
    }
}
