//! # Delete Coordinator
//!
//! Deletion spans two failure domains: the Atlas resource and its credential
//! bundle in Parameter Store. The bundle delete is always attempted, whatever
//! happened to the resource, and the pair of outcomes decides the event.

use std::future::Future;

use tracing::{info, warn};

use crate::atlas::AtlasError;
use crate::vault::{CredentialVault, VaultError};

use super::progress::{HandlerErrorCode, ProgressEvent};

/// Product of the provider-side and vault-side delete results
#[derive(Debug)]
pub struct DeleteOutcome {
    pub resource: Result<(), AtlasError>,
    pub parameter: Result<(), VaultError>,
}

impl DeleteOutcome {
    /// Failure message naming `subject`, or `None` when both sides succeeded
    pub fn failure_message(&self, subject: &str) -> Option<String> {
        match (&self.resource, &self.parameter) {
            (Ok(()), Ok(())) => None,
            (Ok(()), Err(vault)) => Some(format!("parameter delete failed for {subject}: {vault}")),
            (Err(resource), Ok(())) => {
                Some(format!("resource delete failed for {subject}: {resource}"))
            }
            (Err(resource), Err(vault)) => Some(format!(
                "both delete failed for {subject}: {resource}; {vault}"
            )),
        }
    }

    /// `on_success` when both sides succeeded, otherwise a terminal failure
    pub fn into_event<M>(self, subject: &str, on_success: ProgressEvent<M>) -> ProgressEvent<M> {
        match self.failure_message(subject) {
            None => on_success,
            Some(message) => ProgressEvent::failed(HandlerErrorCode::GeneralServiceException, message),
        }
    }
}

/// Run the provider delete, then always attempt the credential bundle delete
pub async fn coordinate_delete<F>(
    provider_delete: F,
    vault: &CredentialVault,
    identifier: &str,
) -> DeleteOutcome
where
    F: Future<Output = Result<(), AtlasError>>,
{
    let resource = provider_delete.await;
    if let Err(e) = &resource {
        warn!("Atlas delete failed for {}: {}", identifier, e);
    }

    let parameter = vault.delete(identifier).await;
    match &parameter {
        Ok(()) => info!("🗑️  Removed credential bundle for {}", identifier),
        Err(e) => warn!("Credential bundle delete failed for {}: {}", identifier, e),
    }

    DeleteOutcome {
        resource,
        parameter,
    }
}
