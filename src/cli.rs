//! # atlasctl
//!
//! Command-line interface for the MongoDB Atlas CloudFormation resource handlers.
//!
//! Drives a handler locally, the way CloudFormation would, and prints the IAM
//! policy the handlers need for their Parameter Store entries.
//!
//! ## Usage
//!
//! ```bash
//! # Create a project and keep re-invoking until it settles
//! atlasctl invoke --type Project --action create --model project.json --follow
//!
//! # Resume a cluster creation from a known state
//! atlasctl invoke --type Cluster --action create --model cluster.json --state CREATING
//!
//! # Print the Parameter Store policy for every resource kind
//! atlasctl policy --region eu-west-1 --account-id 123456789012
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use handlers::config::load_config;
use handlers::runtime::{dispatch, Action, HandlerEvent, RequestData};
use handlers::{ContinuationToken, OperationStatus, ProgressEvent, ResourceKind};
use serde_json::Value;
use tracing::info;

mod runtime;

use runtime::initialize;

/// MongoDB Atlas CloudFormation resources CLI
#[derive(Parser)]
#[command(name = "atlasctl")]
#[command(about = "MongoDB Atlas CloudFormation resources CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a resource handler once, or until it settles
    Invoke {
        /// Resource type, short (`Cluster`) or fully qualified
        #[arg(short = 't', long = "type")]
        resource_type: String,

        /// Handler action (create, read, update, delete, list)
        #[arg(short, long)]
        action: Action,

        /// JSON file with the desired resource properties
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// JSON file with the previous resource properties (updates)
        #[arg(short, long)]
        previous: Option<PathBuf>,

        /// Resume from a polling state, e.g. `CREATING`
        #[arg(short, long)]
        state: Option<String>,

        /// AWS region of the Parameter Store
        #[arg(short, long)]
        region: Option<String>,

        /// Keep re-invoking while the handler reports IN_PROGRESS
        #[arg(short, long)]
        follow: bool,
    },
    /// Print the IAM policy granting the handlers access to their parameters
    Policy {
        /// AWS region of the Parameter Store
        #[arg(short, long)]
        region: String,

        /// AWS account id owning the parameters
        #[arg(long)]
        account_id: String,

        /// Restrict the policy to one resource type
        #[arg(short = 't', long = "type")]
        resource_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke {
            resource_type,
            action,
            model,
            previous,
            state,
            region,
            follow,
        } => {
            let event = HandlerEvent {
                action: action.as_str().to_string(),
                resource_type: parse_kind(&resource_type)?.type_name(),
                region,
                callback_context: state.map(|s| ContinuationToken::polling(s).into_context()),
                request_data: RequestData {
                    resource_properties: model.as_deref().map(read_json).transpose()?,
                    previous_resource_properties: previous.as_deref().map(read_json).transpose()?,
                    caller_credentials: None,
                },
            };
            invoke_command(event, follow).await
        }
        Commands::Policy {
            region,
            account_id,
            resource_type,
        } => policy_command(&region, &account_id, resource_type.as_deref()),
    }
}

fn parse_kind(resource_type: &str) -> Result<ResourceKind> {
    ResourceKind::from_type_name(resource_type)
        .with_context(|| format!("Unknown resource type '{resource_type}'"))
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("'{}' is not valid JSON", path.display()))
}

/// Invoke the handler, re-driving it with the returned callback context when following
async fn invoke_command(mut event: HandlerEvent, follow: bool) -> Result<()> {
    let config = load_config();

    loop {
        let response = dispatch(event.clone(), &config).await;
        println!("{}", serde_json::to_string_pretty(&response)?);

        let progress: ProgressEvent<Value> =
            serde_json::from_value(response).context("Handler returned a malformed progress event")?;

        match progress.status {
            OperationStatus::InProgress if follow => {
                let delay = u64::from(progress.callback_delay_seconds.unwrap_or_default());
                let token = progress.continuation();
                info!(
                    delay_seconds = delay,
                    state = token.state().unwrap_or_default(),
                    "⏳ Handler in progress, re-invoking"
                );
                tokio::time::sleep(Duration::from_secs(delay)).await;
                if let Some(model) = progress.resource_model {
                    event.request_data.resource_properties = Some(model);
                }
                event.callback_context = Some(progress.callback_context);
            }
            OperationStatus::Failed => {
                bail!(
                    "Handler failed: {}",
                    progress.error_code.map_or("unknown", |code| code.as_str())
                );
            }
            _ => return Ok(()),
        }
    }
}

fn policy_command(region: &str, account_id: &str, resource_type: Option<&str>) -> Result<()> {
    let kinds = match resource_type {
        Some(resource_type) => vec![parse_kind(resource_type)?],
        None => ResourceKind::ALL.to_vec(),
    };
    let policy = ResourceKind::iam_policy(&kinds, region, account_id);
    println!("{}", serde_json::to_string_pretty(&policy)?);
    Ok(())
}
