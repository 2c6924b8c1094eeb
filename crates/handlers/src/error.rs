//! # Handler Errors
//!
//! Error taxonomy for resource handlers, with classification into the
//! CloudFormation handler error codes.
//!
//! Handlers return `Result<ProgressEvent<_>, HandlerError>`; the dispatch layer
//! turns every `Err` into a `FAILED` event carrying [`HandlerError::error_code`].

use thiserror::Error;

use crate::atlas::AtlasError;
use crate::protocol::HandlerErrorCode;
use crate::vault::VaultError;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// Missing or contradictory input (permanent - template issue)
    #[error("{0}")]
    InvalidRequest(String),

    /// The resource is gone while it was expected to exist
    #[error("{0}")]
    NotFound(String),

    /// The Atlas API rejected or failed the call
    #[error("{context}: {source}")]
    Atlas {
        context: String,
        #[source]
        source: AtlasError,
    },

    /// Parameter Store failed
    #[error("{context}: {source}")]
    Vault {
        context: String,
        #[source]
        source: VaultError,
    },

    /// The provider reports a terminal error state (peering only)
    #[error("{0}")]
    ErrorState(String),
}

impl HandlerError {
    /// A required model property is absent or empty
    pub fn missing(property: &str) -> Self {
        HandlerError::InvalidRequest(format!("required property `{property}` is missing"))
    }

    pub fn atlas(context: impl Into<String>, source: AtlasError) -> Self {
        HandlerError::Atlas {
            context: context.into(),
            source,
        }
    }

    pub fn vault(context: impl Into<String>, source: VaultError) -> Self {
        HandlerError::Vault {
            context: context.into(),
            source,
        }
    }

    /// Classify this error into a CloudFormation handler error code
    pub fn error_code(&self) -> HandlerErrorCode {
        match self {
            HandlerError::InvalidRequest(_) => HandlerErrorCode::InvalidRequest,
            HandlerError::NotFound(_) => HandlerErrorCode::NotFound,
            HandlerError::Atlas { source, .. } => source.handler_error_code(),
            HandlerError::Vault { source, .. } => {
                if source.is_not_found() {
                    HandlerErrorCode::NotFound
                } else {
                    HandlerErrorCode::GeneralServiceException
                }
            }
            HandlerError::ErrorState(_) => HandlerErrorCode::NotStabilized,
        }
    }
}
