//! # Encryption at Rest Handler

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::identifier::encryption_at_rest_identifier;
use crate::model::{required, EncryptionAtRestModel, ResourceModel};
use crate::protocol::{coordinate_delete, ProgressEvent};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptionAtRestHandler;

impl EncryptionAtRestHandler {
    /// Create and Update both apply the full key configuration
    async fn apply(
        request: &HandlerRequest,
        mut current: EncryptionAtRestModel,
        message: &str,
    ) -> Result<ProgressEvent<EncryptionAtRestModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        if current.aws_kms.is_none() {
            return Err(HandlerError::missing("AwsKms"));
        }

        client
            .encryption_at_rest()
            .apply(&project_id, &current.to_request())
            .await
            .map_err(|e| HandlerError::atlas("error applying encryption at rest", e))?;

        let identifier = encryption_at_rest_identifier(&project_id);
        current.cfn_primary_identifier = Some(identifier.clone());
        request
            .persist(
                EncryptionAtRestModel::KIND,
                &identifier,
                &CredentialBundle::new(current.api_keys.clone())
                    .with_project_id(current.project_id.clone()),
            )
            .await?;

        info!("🔐 Applied encryption at rest for project {}", project_id);
        Ok(ProgressEvent::success(message, current))
    }
}

#[async_trait]
impl ResourceHandler for EncryptionAtRestHandler {
    type Model = EncryptionAtRestModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<EncryptionAtRestModel>,
        current: EncryptionAtRestModel,
    ) -> Result<ProgressEvent<EncryptionAtRestModel>, HandlerError> {
        Self::apply(request, current, "Create Complete").await
    }

    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<EncryptionAtRestModel>,
        mut current: EncryptionAtRestModel,
    ) -> Result<ProgressEvent<EncryptionAtRestModel>, HandlerError> {
        let identifier = identifier_of(&current)?.to_string();
        let (client, bundle) = request
            .vaulted_client(EncryptionAtRestModel::KIND, &identifier)
            .await?;
        let project_id = required(&bundle.project_id, "ProjectId")?;

        let remote = client.encryption_at_rest().get(project_id).await.map_err(|e| {
            HandlerError::atlas(
                format!("error fetching encryption at rest configuration for project ({project_id})"),
                e,
            )
        })?;
        current.apply_remote(remote);
        current.project_id = Some(project_id.to_string());
        Ok(ProgressEvent::success("Read Complete", current))
    }

    async fn update(
        &self,
        request: &HandlerRequest,
        _prev: Option<EncryptionAtRestModel>,
        current: EncryptionAtRestModel,
    ) -> Result<ProgressEvent<EncryptionAtRestModel>, HandlerError> {
        Self::apply(request, current, "Update Complete").await
    }

    /// Disabling the customer key stands in for deletion
    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<EncryptionAtRestModel>,
        current: EncryptionAtRestModel,
    ) -> Result<ProgressEvent<EncryptionAtRestModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let identifier = current
            .cfn_primary_identifier
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| encryption_at_rest_identifier(&project_id));

        let outcome = coordinate_delete(
            client.encryption_at_rest().disable(&project_id),
            &request.vault(EncryptionAtRestModel::KIND),
            &identifier,
        )
        .await;
        Ok(outcome.into_event(
            &identifier,
            ProgressEvent::success("Delete Complete", current),
        ))
    }
}
