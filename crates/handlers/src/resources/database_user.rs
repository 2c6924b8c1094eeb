//! # Database User Handler

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::identifier::database_user_identifier;
use crate::model::{required, DatabaseUserModel, ResourceModel};
use crate::protocol::{coordinate_delete, ProgressEvent};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

#[derive(Debug, Clone, Copy, Default)]
pub struct DatabaseUserHandler;

fn bundle(model: &DatabaseUserModel) -> CredentialBundle {
    CredentialBundle::new(model.api_keys.clone())
        .with_project_id(model.project_id.clone())
        .with_user(model.username.clone(), model.database_name.clone())
}

#[async_trait]
impl ResourceHandler for DatabaseUserHandler {
    type Model = DatabaseUserModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<DatabaseUserModel>,
        mut current: DatabaseUserModel,
    ) -> Result<ProgressEvent<DatabaseUserModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let username = required(&current.username, "Username")?.to_string();

        client
            .database_users()
            .create(&project_id, &current.to_request(&project_id))
            .await
            .map_err(|e| HandlerError::atlas("error creating database user", e))?;

        let identifier = database_user_identifier(&project_id, &username);
        current.user_cfn_identifier = Some(identifier.clone());
        request
            .persist(DatabaseUserModel::KIND, &identifier, &bundle(&current))
            .await?;

        info!("✅ Created database user {}", identifier);
        Ok(ProgressEvent::success("Create Complete", current))
    }

    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<DatabaseUserModel>,
        mut current: DatabaseUserModel,
    ) -> Result<ProgressEvent<DatabaseUserModel>, HandlerError> {
        let identifier = identifier_of(&current)?.to_string();
        let (client, bundle) = request
            .vaulted_client(DatabaseUserModel::KIND, &identifier)
            .await?;
        let project_id = required(&bundle.project_id, "ProjectId")?;
        let username = required(&bundle.username, "Username")?;
        let database_name = required(&bundle.database_name, "DatabaseName")?;

        let remote = client
            .database_users()
            .get(project_id, database_name, username)
            .await
            .map_err(|e| {
                HandlerError::atlas(format!("error fetching database user ({username})"), e)
            })?;

        current.apply_remote(remote);
        current.project_id = Some(project_id.to_string());
        Ok(ProgressEvent::success("Read Complete", current))
    }

    async fn update(
        &self,
        request: &HandlerRequest,
        prev: Option<DatabaseUserModel>,
        mut current: DatabaseUserModel,
    ) -> Result<ProgressEvent<DatabaseUserModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let username = required(&current.username, "Username")?.to_string();
        let database_name = required(&current.database_name, "DatabaseName")?.to_string();

        client
            .database_users()
            .update(
                &project_id,
                &database_name,
                &username,
                &current.to_request(&project_id),
            )
            .await
            .map_err(|e| {
                HandlerError::atlas(format!("error updating database user ({username})"), e)
            })?;

        let identifier = prev
            .and_then(|p| p.user_cfn_identifier)
            .or_else(|| current.user_cfn_identifier.take())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| database_user_identifier(&project_id, &username));
        current.user_cfn_identifier = Some(identifier.clone());
        request
            .persist(DatabaseUserModel::KIND, &identifier, &bundle(&current))
            .await?;

        info!("✅ Updated database user {}", identifier);
        Ok(ProgressEvent::success("Update Complete", current))
    }

    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<DatabaseUserModel>,
        current: DatabaseUserModel,
    ) -> Result<ProgressEvent<DatabaseUserModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let username = required(&current.username, "Username")?.to_string();
        let database_name = required(&current.database_name, "DatabaseName")?.to_string();
        let identifier = current
            .user_cfn_identifier
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| database_user_identifier(&project_id, &username));

        // An already removed user counts as deleted
        let remove_user = async {
            match client
                .database_users()
                .delete(&project_id, &database_name, &username)
                .await
            {
                Err(e) if e.is_not_found() => Ok(()),
                other => other,
            }
        };
        let outcome = coordinate_delete(
            remove_user,
            &request.vault(DatabaseUserModel::KIND),
            &identifier,
        )
        .await;

        Ok(outcome.into_event(
            &identifier,
            ProgressEvent::success("Delete Complete", current),
        ))
    }
}
