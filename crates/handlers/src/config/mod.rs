//! # Handler Configuration
//!
//! Handler-level configuration loaded from environment variables.
//!
//! All configuration has sensible defaults and can be overridden via environment variables.
//! The configuration travels inside each [`crate::HandlerRequest`]; nothing is cached
//! process-wide.

mod handler;

pub use handler::HandlerConfig;

/// Load configuration from environment variables with defaults
pub fn load_config() -> HandlerConfig {
    HandlerConfig::from_env()
}
