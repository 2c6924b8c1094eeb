//! # Atlas Errors

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::protocol::HandlerErrorCode;

/// Error document returned by the Atlas API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    /// HTTP status echoed by Atlas
    #[serde(default)]
    pub error: Option<u16>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.error_code.as_deref().unwrap_or("UNKNOWN");
        match (self.detail.as_deref(), self.reason.as_deref()) {
            (Some(detail), _) => write!(f, "{code}: {detail}"),
            (None, Some(reason)) => write!(f, "{code}: {reason}"),
            (None, None) => f.write_str(code),
        }
    }
}

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Atlas API keys are missing: both PublicKey and PrivateKey are required")]
    MissingCredentials,

    #[error("invalid Atlas base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Atlas request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Atlas API returned HTTP {status} ({body})")]
    Api { status: u16, body: ApiErrorBody },

    #[error("Atlas digest challenge could not be answered: {0}")]
    Challenge(String),

    #[error("failed to encode Atlas request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode Atlas response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl AtlasError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            AtlasError::Api { status, .. } => Some(*status),
            AtlasError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Atlas error code (e.g. `CLUSTER_NOT_FOUND`), if the API sent one
    pub fn error_code(&self) -> Option<&str> {
        match self {
            AtlasError::Api { body, .. } => body.error_code.as_deref(),
            _ => None,
        }
    }

    pub fn handler_error_code(&self) -> HandlerErrorCode {
        match self {
            AtlasError::MissingCredentials | AtlasError::InvalidBaseUrl { .. } => {
                HandlerErrorCode::InvalidRequest
            }
            _ => match self.status() {
                Some(404) => HandlerErrorCode::NotFound,
                Some(401) => HandlerErrorCode::InvalidCredentials,
                Some(403) => HandlerErrorCode::AccessDenied,
                _ => HandlerErrorCode::GeneralServiceException,
            },
        }
    }
}
