//! # Handler Settings
//!
//! Atlas endpoint, request deadline and Parameter Store settings.

use std::time::Duration;

/// Handler configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Atlas API root, without a trailing slash
    pub atlas_base_url: String,
    /// Per-request timeout against the Atlas API (seconds)
    pub request_timeout_secs: u64,
    /// Parameter Store endpoint override
    /// Used to route SSM traffic to a local mock instead of AWS
    pub ssm_endpoint_url: Option<String>,
    /// Region used when the invocation does not carry one
    pub default_region: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            atlas_base_url: DEFAULT_ATLAS_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_ATLAS_REQUEST_TIMEOUT_SECS,
            ssm_endpoint_url: None,
            default_region: DEFAULT_AWS_REGION.to_string(),
        }
    }
}

impl HandlerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        use crate::constants::*;
        Self {
            atlas_base_url: var_or_default(&lookup, "ATLAS_BASE_URL", DEFAULT_ATLAS_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs: var_or_default(
                &lookup,
                "ATLAS_REQUEST_TIMEOUT_SECS",
                DEFAULT_ATLAS_REQUEST_TIMEOUT_SECS,
            ),
            ssm_endpoint_url: lookup("SSM_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
            default_region: var_or_default(&lookup, "AWS_REGION", DEFAULT_AWS_REGION.to_string()),
        }
    }

    /// Point the Atlas client at a different API root (mock servers, Atlas for Government)
    #[must_use]
    pub fn with_atlas_base_url(mut self, url: impl Into<String>) -> Self {
        self.atlas_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Route Parameter Store traffic to a different endpoint
    #[must_use]
    pub fn with_ssm_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.ssm_endpoint_url = Some(url.into());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read a variable through `lookup` or return the default value
fn var_or_default<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
