//! # Credential Vault
//!
//! Per-resource credential bundles in AWS Systems Manager Parameter Store.
//!
//! Read invocations carry only the primary identifier, so every Create/Update
//! persists the Atlas API keys (and the parent ids needed to address the
//! resource) under `"<kind-prefix>-<primary-identifier>"` as a `SecureString`.
//!
//! - `ParameterStore`: the storage seam (SSM in production, in-memory in tests)
//! - `CredentialVault`: one adapter parameterized by kind prefix and bundle shape

mod auth;
mod ssm;

pub use auth::{create_sdk_config, CallerCredentials};
pub use ssm::SsmParameterStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::identifier::ResourceKind;
use crate::model::ApiKeys;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("parameter {name} not found")]
    NotFound { name: String },

    #[error("parameter store request for {name} failed: {message}")]
    Store { name: String, message: String },

    #[error("parameter {name} has no value")]
    EmptyValue { name: String },

    #[error("parameter {name} holds an invalid credential bundle: {source}")]
    InvalidBundle {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl VaultError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::NotFound { .. })
    }
}

/// Encrypted key-value storage
#[async_trait]
pub trait ParameterStore: Send + Sync + std::fmt::Debug {
    /// Store `value` encrypted, replacing any previous value
    async fn put_secure(&self, name: &str, value: &str) -> Result<(), VaultError>;

    /// Read and decrypt a value
    async fn get_decrypted(&self, name: &str) -> Result<String, VaultError>;

    async fn delete(&self, name: &str) -> Result<(), VaultError>;
}

/// Credential bundle persisted for later Read invocations
///
/// Keys are PascalCase so bundles written by earlier handler releases stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
}

impl CredentialBundle {
    pub fn new(api_keys: Option<ApiKeys>) -> Self {
        Self {
            api_keys,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    #[must_use]
    pub fn with_cluster_name(mut self, cluster_name: Option<String>) -> Self {
        self.cluster_name = cluster_name;
        self
    }

    #[must_use]
    pub fn with_user(mut self, username: Option<String>, database_name: Option<String>) -> Self {
        self.username = username;
        self.database_name = database_name;
        self
    }
}

/// Parameter Store adapter for one resource kind
#[derive(Debug, Clone)]
pub struct CredentialVault {
    store: Arc<dyn ParameterStore>,
    kind: ResourceKind,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn ParameterStore>, kind: ResourceKind) -> Self {
        Self { store, kind }
    }

    pub fn parameter_name(&self, primary_identifier: &str) -> String {
        self.kind.parameter_name(primary_identifier)
    }

    /// Upsert the bundle for `primary_identifier`
    pub async fn put<B: Serialize + Sync>(
        &self,
        primary_identifier: &str,
        bundle: &B,
    ) -> Result<(), VaultError> {
        let name = self.parameter_name(primary_identifier);
        let value = serde_json::to_string(bundle).map_err(|source| VaultError::InvalidBundle {
            name: name.clone(),
            source,
        })?;
        debug!("Writing credential bundle {}", name);
        self.store.put_secure(&name, &value).await
    }

    pub async fn get<B: DeserializeOwned>(&self, primary_identifier: &str) -> Result<B, VaultError> {
        let name = self.parameter_name(primary_identifier);
        debug!("Reading credential bundle {}", name);
        let value = self.store.get_decrypted(&name).await?;
        serde_json::from_str(&value).map_err(|source| VaultError::InvalidBundle { name, source })
    }

    pub async fn delete(&self, primary_identifier: &str) -> Result<(), VaultError> {
        let name = self.parameter_name(primary_identifier);
        debug!("Deleting credential bundle {}", name);
        self.store.delete(&name).await
    }
}
