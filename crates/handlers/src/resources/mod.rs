//! # Resource Handlers
//!
//! One handler per resource type, each exposing Create, Read, Update, Delete
//! and List with the same signature. Handlers return
//! `Result<ProgressEvent<_>, HandlerError>`; turning errors into `FAILED`
//! events is left to the dispatch layer.

mod cluster;
mod database_user;
mod encryption_at_rest;
mod network_container;
mod network_peering;
mod project;
mod project_ip_access_list;

pub use cluster::ClusterHandler;
pub use database_user::DatabaseUserHandler;
pub use encryption_at_rest::EncryptionAtRestHandler;
pub use network_container::NetworkContainerHandler;
pub use network_peering::NetworkPeeringHandler;
pub use project::ProjectHandler;
pub use project_ip_access_list::ProjectIpAccessListHandler;

use std::sync::Arc;

use async_trait::async_trait;

use crate::atlas::AtlasClient;
use crate::config::HandlerConfig;
use crate::error::HandlerError;
use crate::identifier::ResourceKind;
use crate::model::{ApiKeys, ResourceModel};
use crate::protocol::{CallbackContext, ContinuationToken, ProgressEvent};
use crate::vault::{CredentialBundle, CredentialVault, ParameterStore};

/// Everything a handler needs besides the models
///
/// Built fresh for every invocation: the parameter store and the Atlas
/// client never outlive one call.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    callback_context: CallbackContext,
    store: Arc<dyn ParameterStore>,
    config: HandlerConfig,
}

impl HandlerRequest {
    pub fn new(store: Arc<dyn ParameterStore>, config: HandlerConfig) -> Self {
        Self {
            callback_context: CallbackContext::new(),
            store,
            config,
        }
    }

    /// Context returned by the previous invocation of the same operation
    #[must_use]
    pub fn with_callback_context(mut self, callback_context: CallbackContext) -> Self {
        self.callback_context = callback_context;
        self
    }

    pub fn token(&self) -> ContinuationToken {
        ContinuationToken::from(&self.callback_context)
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Credential vault scoped to one resource kind
    pub fn vault(&self, kind: ResourceKind) -> CredentialVault {
        CredentialVault::new(Arc::clone(&self.store), kind)
    }

    /// Authenticated Atlas client from a model's key pair
    pub fn atlas_client(&self, api_keys: Option<&ApiKeys>) -> Result<AtlasClient, HandlerError> {
        let (public_key, private_key) = api_keys
            .and_then(ApiKeys::pair)
            .ok_or_else(|| HandlerError::missing("ApiKeys"))?;
        AtlasClient::new(public_key, private_key, &self.config)
            .map_err(|e| HandlerError::atlas("failed to create Atlas client", e))
    }

    /// Atlas client from the credentials persisted under `identifier`
    ///
    /// Read never trusts the keys in the incoming model.
    pub async fn vaulted_client(
        &self,
        kind: ResourceKind,
        identifier: &str,
    ) -> Result<(AtlasClient, CredentialBundle), HandlerError> {
        let bundle: CredentialBundle = self.vault(kind).get(identifier).await.map_err(|e| {
            HandlerError::vault(format!("failed to read credentials for {identifier}"), e)
        })?;
        let client = self.atlas_client(bundle.api_keys.as_ref())?;
        Ok((client, bundle))
    }

    /// Upsert the credential bundle for `identifier`
    pub async fn persist(
        &self,
        kind: ResourceKind,
        identifier: &str,
        bundle: &CredentialBundle,
    ) -> Result<(), HandlerError> {
        self.vault(kind).put(identifier, bundle).await.map_err(|e| {
            HandlerError::vault(format!("failed to store credentials for {identifier}"), e)
        })
    }
}

/// The primary identifier of `model`, which must already be set
pub fn identifier_of<M: ResourceModel>(model: &M) -> Result<&str, HandlerError> {
    model
        .primary_identifier()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HandlerError::missing(M::IDENTIFIER_PROPERTY))
}

/// Lifecycle operations of one resource type
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    type Model: ResourceModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        prev: Option<Self::Model>,
        current: Self::Model,
    ) -> Result<ProgressEvent<Self::Model>, HandlerError>;

    async fn read(
        &self,
        request: &HandlerRequest,
        prev: Option<Self::Model>,
        current: Self::Model,
    ) -> Result<ProgressEvent<Self::Model>, HandlerError>;

    async fn update(
        &self,
        request: &HandlerRequest,
        prev: Option<Self::Model>,
        current: Self::Model,
    ) -> Result<ProgressEvent<Self::Model>, HandlerError>;

    async fn delete(
        &self,
        request: &HandlerRequest,
        prev: Option<Self::Model>,
        current: Self::Model,
    ) -> Result<ProgressEvent<Self::Model>, HandlerError>;

    /// Pass-through unless the resource type supports listing
    async fn list(
        &self,
        _request: &HandlerRequest,
        _prev: Option<Self::Model>,
        current: Self::Model,
    ) -> Result<ProgressEvent<Self::Model>, HandlerError> {
        Ok(ProgressEvent::success("List Complete", current))
    }
}
