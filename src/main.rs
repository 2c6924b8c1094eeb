//! # MongoDB Atlas CloudFormation Resources
//!
//! Handler entrypoint for the `MongoDB::StpAtlasV1::*` resource types.
//!
//! ## Overview
//!
//! Each invocation is one JSON event on stdin. The binary:
//!
//! 1. **Decodes the event** - action, resource type, models and callback context
//! 2. **Dispatches it** - to the handler of the resource kind
//! 3. **Writes the progress event** - as JSON on stdout, logs go to stderr
//!
//! Handler failures never fail the process; they are reported as `FAILED`
//! progress events. Only unreadable input exits non-zero.
//!
//! ## Usage
//!
//! See the [README.md](../README.md) for the event format and configuration.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use handlers::config::load_config;
use handlers::runtime::{dispatch, HandlerEvent};
use tracing::debug;

mod runtime;

use runtime::initialize;

#[tokio::main]
async fn main() -> Result<()> {
    initialize()?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read handler event from stdin")?;
    let event: HandlerEvent =
        serde_json::from_str(&input).context("Failed to decode handler event")?;

    let config = load_config();
    debug!(atlas.base_url = %config.atlas_base_url, "Loaded handler configuration");

    let response = dispatch(event, &config).await;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response).context("Failed to write progress event")?;
    writeln!(stdout).context("Failed to write progress event")?;
    Ok(())
}
