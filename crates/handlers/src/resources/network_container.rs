//! # Network Container Handler

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::model::{required, NetworkContainerModel, ResourceModel};
use crate::protocol::{coordinate_delete, ProgressEvent};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkContainerHandler;

fn bundle(model: &NetworkContainerModel) -> CredentialBundle {
    CredentialBundle::new(model.api_keys.clone()).with_project_id(model.project_id.clone())
}

#[async_trait]
impl ResourceHandler for NetworkContainerHandler {
    type Model = NetworkContainerModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkContainerModel>,
        mut current: NetworkContainerModel,
    ) -> Result<ProgressEvent<NetworkContainerModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();

        let remote = client
            .containers()
            .create(&project_id, &current.to_request())
            .await
            .map_err(|e| HandlerError::atlas("error creating network container", e))?;
        current.apply_remote(remote);

        let container_id = identifier_of(&current)?.to_string();
        request
            .persist(NetworkContainerModel::KIND, &container_id, &bundle(&current))
            .await?;

        info!("✅ Created network container {} in project {}", container_id, project_id);
        Ok(ProgressEvent::success("Create complete", current))
    }

    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkContainerModel>,
        mut current: NetworkContainerModel,
    ) -> Result<ProgressEvent<NetworkContainerModel>, HandlerError> {
        let container_id = identifier_of(&current)?.to_string();
        let (client, bundle) = request
            .vaulted_client(NetworkContainerModel::KIND, &container_id)
            .await?;
        let project_id = required(&bundle.project_id, "ProjectId")?;

        let remote = client
            .containers()
            .get(project_id, &container_id)
            .await
            .map_err(|e| {
                HandlerError::atlas(
                    format!(
                        "error reading container with id(project: {project_id}, container: {container_id})"
                    ),
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
        _prev: Option<NetworkContainerModel>,
        mut current: NetworkContainerModel,
    ) -> Result<ProgressEvent<NetworkContainerModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let container_id = identifier_of(&current)?.to_string();

        let remote = client
            .containers()
            .update(&project_id, &container_id, &current.to_request())
            .await
            .map_err(|e| {
                HandlerError::atlas(
                    format!(
                        "error updating container with id(project: {project_id}, container: {container_id})"
                    ),
                    e,
                )
            })?;
        current.apply_remote(remote);
        request
            .persist(NetworkContainerModel::KIND, &container_id, &bundle(&current))
            .await?;

        Ok(ProgressEvent::success("Update Complete", current))
    }

    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkContainerModel>,
        current: NetworkContainerModel,
    ) -> Result<ProgressEvent<NetworkContainerModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let container_id = identifier_of(&current)?.to_string();

        let outcome = coordinate_delete(
            client.containers().delete(&project_id, &container_id),
            &request.vault(NetworkContainerModel::KIND),
            &container_id,
        )
        .await;
        Ok(outcome.into_event(
            &container_id,
            ProgressEvent::success("Delete Complete", current),
        ))
    }

    /// Containers are not listed
    async fn list(
        &self,
        _request: &HandlerRequest,
        _prev: Option<NetworkContainerModel>,
        _current: NetworkContainerModel,
    ) -> Result<ProgressEvent<NetworkContainerModel>, HandlerError> {
        Ok(ProgressEvent::listed("List Complete", Vec::new()))
    }
}
