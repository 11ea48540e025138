use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FetchError, Result};

const DEFAULT_API_URL: &str = "https://api.nasa.gov/planetary/apod";
const DEFAULT_MIRROR_URL: &str = "https://cdn.jsdelivr.net/gh/GCA-Classroom/apod/data.json";
const DEFAULT_API_KEY: &str = "DEMO_KEY";

/// Attempt count and base backoff for one leg of the fallback.
///
/// The delay before retry N (1-indexed) is `base_delay * 2^(N-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryBudget {
    /// Total attempts, including the first one.
    pub attempts: u32,

    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
}

impl RetryBudget {
    pub const fn new(attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            attempts,
            base_delay_ms,
        }
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Budget for the rate-limited primary API: 3 attempts, 800ms base.
    pub const fn primary() -> Self {
        Self::new(3, 800)
    }

    /// Budget for the static mirror: 2 attempts, 600ms base.
    pub const fn mirror() -> Self {
        Self::new(2, 600)
    }
}

/// Read-only settings shared by every pipeline run.
///
/// # Examples
///
/// ```
/// use apod_fetch::{PipelineConfig, RetryBudget};
///
/// let config = PipelineConfig {
///     api_key: "my-key".into(),
///     primary: RetryBudget::new(5, 200),
///     ..PipelineConfig::default()
/// };
/// assert_eq!(config.mirror, RetryBudget::mirror());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Base URL of the date-scopable API.
    pub api_url: String,

    /// Static credential sent as the `api_key` query parameter.
    pub api_key: String,

    /// Unscoped JSON document used as fallback and as the no-range default.
    pub mirror_url: String,

    /// Default: 3 attempts, 800ms.
    pub primary: RetryBudget,

    /// Default: 2 attempts, 600ms.
    pub mirror: RetryBudget,

    /// Per-request timeout applied by the HTTP client.
    ///
    /// Default: 30
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            mirror_url: DEFAULT_MIRROR_URL.to_string(),
            primary: RetryBudget::primary(),
            mirror: RetryBudget::mirror(),
            request_timeout_secs: 30,
        }
    }
}

impl PipelineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and check the configured locations.
    pub fn endpoints(&self) -> Result<Endpoints> {
        if self.primary.attempts == 0 || self.mirror.attempts == 0 {
            return Err(FetchError::InvalidConfig(
                "retry budgets need at least one attempt".into(),
            ));
        }
        Ok(Endpoints {
            api_url: parse_url("api_url", &self.api_url)?,
            api_key: self.api_key.trim().to_string(),
            mirror_url: parse_url("mirror_url", &self.mirror_url)?,
        })
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    Url::parse(value.trim())
        .map_err(|e| FetchError::InvalidConfig(format!("{field} '{value}': {e}")))
}

/// Validated request locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: Url,
    pub api_key: String,
    pub mirror_url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budgets_match_legs() {
        let config = PipelineConfig::default();
        assert_eq!(config.primary, RetryBudget::new(3, 800));
        assert_eq!(config.mirror, RetryBudget::new(2, 600));
        assert_eq!(config.primary.base_delay(), Duration::from_millis(800));
    }

    #[test]
    fn endpoints_parse_default_urls() {
        let endpoints = PipelineConfig::default().endpoints().unwrap();
        assert_eq!(endpoints.api_url.host_str(), Some("api.nasa.gov"));
        assert_eq!(endpoints.mirror_url.scheme(), "https");
    }

    #[test]
    fn endpoints_reject_bad_url() {
        let config = PipelineConfig {
            mirror_url: "not a url".into(),
            ..PipelineConfig::default()
        };
        let err = config.endpoints().unwrap_err();
        assert!(matches!(err, FetchError::InvalidConfig(msg) if msg.contains("mirror_url")));
    }

    #[test]
    fn endpoints_reject_empty_budget() {
        let config = PipelineConfig {
            primary: RetryBudget::new(0, 800),
            ..PipelineConfig::default()
        };
        assert!(config.endpoints().is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"api_key": "abc", "mirror": {"attempts": 4, "base_delay_ms": 10}}"#)
                .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.mirror, RetryBudget::new(4, 10));
        assert_eq!(config.primary, RetryBudget::primary());
    }
}
