//! # Parameter Store Authentication
//!
//! Handles AWS SDK configuration for the per-invocation Parameter Store client.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use serde::Deserialize;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Session credentials handed to the handler by CloudFormation
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CallerCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl std::fmt::Debug for CallerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallerCredentials")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

/// Create AWS SDK config for one invocation
///
/// Uses the caller's session credentials when present, otherwise the default
/// credential chain (environment, profile, container or instance role).
pub async fn create_sdk_config(
    region: &str,
    credentials: Option<&CallerCredentials>,
    endpoint_url: Option<&str>,
) -> SdkConfig {
    let mut builder =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    if let Some(credentials) = credentials {
        builder = builder.credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials.session_token.clone(),
            None,
            "cloudformation-caller",
        ));
    } else {
        info!("No caller credentials in request, using the default AWS credential chain");
    }

    // Route requests to a mock or local endpoint instead of real AWS
    if let Some(endpoint) = endpoint_url {
        info!("Routing Parameter Store requests to {}", endpoint);
        builder = builder.endpoint_url(endpoint);
    }

    builder.load().await
}
