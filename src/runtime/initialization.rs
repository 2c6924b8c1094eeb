//! # Initialization
//!
//! rustls provider selection and the tracing subscriber.
//!
//! Logs go to stderr: stdout carries the progress event.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "atlas_cfn_resources=info,handlers=info";

/// Prepare the process for handling invocations
///
/// Must run before the first Atlas or Parameter Store request.
pub fn initialize() -> Result<()> {
    // rustls 0.23 needs an explicit provider when more than one is compiled in
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_provider| anyhow!("failed to install rustls crypto provider"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
