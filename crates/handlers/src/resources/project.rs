//! # Project Handler

use async_trait::async_trait;
use tracing::info;

use crate::atlas::Project;
use crate::constants::PROJECT_LIST_PAGE_SIZE;
use crate::error::HandlerError;
use crate::model::{required, ApiKeys, ProjectModel, ResourceModel};
use crate::protocol::{coordinate_delete, ProgressEvent};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectHandler;

#[async_trait]
impl ResourceHandler for ProjectHandler {
    type Model = ProjectModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectModel>,
        mut current: ProjectModel,
    ) -> Result<ProgressEvent<ProjectModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let body = Project {
            name: Some(required(&current.name, "Name")?.to_string()),
            org_id: Some(required(&current.org_id, "OrgId")?.to_string()),
            ..Project::default()
        };

        let remote = client
            .projects()
            .create(&body)
            .await
            .map_err(|e| HandlerError::atlas("error creating project", e))?;
        current.apply_remote(remote);

        let project_id = identifier_of(&current)?.to_string();
        request
            .persist(
                ProjectModel::KIND,
                &project_id,
                &CredentialBundle::new(current.api_keys.clone()),
            )
            .await?;

        info!("✅ Created project {}", project_id);
        Ok(ProgressEvent::success("Create Complete", current))
    }

    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectModel>,
        mut current: ProjectModel,
    ) -> Result<ProgressEvent<ProjectModel>, HandlerError> {
        let project_id = identifier_of(&current)?.to_string();
        let (client, _) = request
            .vaulted_client(ProjectModel::KIND, &project_id)
            .await?;

        let remote = client.projects().get(&project_id).await.map_err(|e| {
            HandlerError::atlas(format!("error reading project with id({project_id})"), e)
        })?;
        current.apply_remote(remote);
        Ok(ProgressEvent::success("Read Complete", current))
    }

    /// Projects are immutable; only rotated API keys are persisted
    async fn update(
        &self,
        request: &HandlerRequest,
        prev: Option<ProjectModel>,
        mut current: ProjectModel,
    ) -> Result<ProgressEvent<ProjectModel>, HandlerError> {
        if current.id.as_deref().is_none_or(str::is_empty) {
            current.id = prev.and_then(|p| p.id);
        }
        let project_id = identifier_of(&current)?.to_string();
        if current.api_keys.as_ref().and_then(ApiKeys::pair).is_some() {
            request
                .persist(
                    ProjectModel::KIND,
                    &project_id,
                    &CredentialBundle::new(current.api_keys.clone()),
                )
                .await?;
        }
        Ok(ProgressEvent::success("Update Complete", current))
    }

    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectModel>,
        current: ProjectModel,
    ) -> Result<ProgressEvent<ProjectModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = identifier_of(&current)?.to_string();

        let outcome = coordinate_delete(
            client.projects().delete(&project_id),
            &request.vault(ProjectModel::KIND),
            &project_id,
        )
        .await;
        Ok(outcome.into_event(
            &project_id,
            ProgressEvent::success("Delete Complete", current),
        ))
    }

    /// First page of the projects visible to the key pair
    async fn list(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectModel>,
        current: ProjectModel,
    ) -> Result<ProgressEvent<ProjectModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let projects = client
            .projects()
            .list(1, PROJECT_LIST_PAGE_SIZE)
            .await
            .map_err(|e| HandlerError::atlas("error retrieving projects", e))?;

        let models = projects.into_iter().map(ProjectModel::from_remote).collect();
        Ok(ProgressEvent::listed("List Complete", models))
    }
}
