//! # Project IP Access List Handler
//!
//! Atlas keeps one access list per project. This resource owns the subset of
//! entries it declares: Update removes the previous subset before adding the
//! new one, and Delete removes every declared entry.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::atlas::{AtlasClient, AtlasError};
use crate::error::HandlerError;
use crate::identifier::access_list_identifier;
use crate::model::project_ip_access_list::AccessListDefinition;
use crate::model::{required, ProjectIpAccessListModel, ResourceModel};
use crate::protocol::{coordinate_delete, ProgressEvent};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectIpAccessListHandler;

fn bundle(model: &ProjectIpAccessListModel) -> CredentialBundle {
    CredentialBundle::new(model.api_keys.clone()).with_project_id(model.project_id.clone())
}

async fn create_entries(
    client: &AtlasClient,
    model: &ProjectIpAccessListModel,
) -> Result<(), HandlerError> {
    let project_id = required(&model.project_id, "ProjectId")?;
    client
        .access_list()
        .create(project_id, &model.to_request(project_id))
        .await
        .map_err(|e| HandlerError::atlas("error creating project ip access list", e))?;
    Ok(())
}

/// Delete every entry of `model`, attempting all of them; the first failure is returned
async fn delete_entries(
    client: &AtlasClient,
    project_id: &str,
    model: &ProjectIpAccessListModel,
) -> Result<(), AtlasError> {
    let mut first_error = None;
    for entry in model.entry_keys() {
        if let Err(e) = client.access_list().delete(project_id, entry).await {
            warn!("Failed to delete access list entry {}: {}", entry, e);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

#[async_trait]
impl ResourceHandler for ProjectIpAccessListHandler {
    type Model = ProjectIpAccessListModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectIpAccessListModel>,
        mut current: ProjectIpAccessListModel,
    ) -> Result<ProgressEvent<ProjectIpAccessListModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        create_entries(&client, &current).await?;

        let identifier = access_list_identifier();
        current.id = Some(identifier.clone());
        request
            .persist(ProjectIpAccessListModel::KIND, &identifier, &bundle(&current))
            .await?;

        info!(
            "✅ Created {} access list entries as {}",
            current.entries().len(),
            identifier
        );
        Ok(ProgressEvent::success("Create Complete", current))
    }

    /// Fetch every declared entry with the persisted credentials
    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectIpAccessListModel>,
        mut current: ProjectIpAccessListModel,
    ) -> Result<ProgressEvent<ProjectIpAccessListModel>, HandlerError> {
        let identifier = identifier_of(&current)?.to_string();
        let (client, bundle) = request
            .vaulted_client(ProjectIpAccessListModel::KIND, &identifier)
            .await?;
        let project_id = required(&bundle.project_id, "ProjectId")?;

        let mut entries = Vec::new();
        for entry in current.entry_keys() {
            let remote = client
                .access_list()
                .get(project_id, entry)
                .await
                .map_err(|e| {
                    HandlerError::atlas(format!("error reading access list entry {entry}"), e)
                })?;
            entries.push(AccessListDefinition::from_remote(remote));
        }

        current.access_list = Some(entries);
        current.project_id = Some(project_id.to_string());
        Ok(ProgressEvent::success("Read Complete", current))
    }

    async fn update(
        &self,
        request: &HandlerRequest,
        prev: Option<ProjectIpAccessListModel>,
        mut current: ProjectIpAccessListModel,
    ) -> Result<ProgressEvent<ProjectIpAccessListModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let prev = prev.unwrap_or_default();
        current.id = prev
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| current.id.take());
        let identifier = identifier_of(&current)?.to_string();

        let prev_project = prev
            .project_id
            .as_deref()
            .or(current.project_id.as_deref())
            .unwrap_or_default()
            .to_string();
        delete_entries(&client, &prev_project, &prev)
            .await
            .map_err(|e| HandlerError::atlas("error removing previous access list entries", e))?;
        create_entries(&client, &current).await?;

        request
            .persist(ProjectIpAccessListModel::KIND, &identifier, &bundle(&current))
            .await?;

        Ok(ProgressEvent::success("Update Complete", current))
    }

    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<ProjectIpAccessListModel>,
        current: ProjectIpAccessListModel,
    ) -> Result<ProgressEvent<ProjectIpAccessListModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let identifier = identifier_of(&current)?.to_string();

        let outcome = coordinate_delete(
            delete_entries(&client, &project_id, &current),
            &request.vault(ProjectIpAccessListModel::KIND),
            &identifier,
        )
        .await;
        Ok(outcome.into_event(
            &identifier,
            ProgressEvent::success("Delete Complete", current),
        ))
    }
}
