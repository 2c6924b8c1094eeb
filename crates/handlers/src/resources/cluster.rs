//! # Cluster Handler
//!
//! Create, Update and Delete return `IN_PROGRESS` right after Atlas accepts
//! the change; the following invocations poll the cluster until it reaches
//! the operation's target state.

use async_trait::async_trait;
use tracing::info;

use crate::atlas::AtlasClient;
use crate::constants::{
    CLUSTER_INITIATION_DELAY_SECS, CLUSTER_POLL_DELAY_SECS, STATE_DELETED, STATE_DELETING,
    STATE_IDLE,
};
use crate::error::HandlerError;
use crate::identifier::cluster_identifier;
use crate::model::{required, ClusterModel, ResourceModel};
use crate::protocol::{
    coordinate_delete, evaluate, observe, ContinuationToken, Observation, PollOutcome, PollSpec,
    PollSubject, ProgressEvent,
};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

const SETTLE: PollSpec = PollSpec {
    target_states: &[STATE_IDLE],
    error_states: &[],
    poll_delay_secs: CLUSTER_POLL_DELAY_SECS,
};

const REMOVE: PollSpec = PollSpec {
    target_states: &[STATE_DELETED],
    error_states: &[],
    poll_delay_secs: CLUSTER_POLL_DELAY_SECS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterHandler;

/// `(projectId, clusterName)` of a model, both required
fn coordinates(model: &ClusterModel) -> Result<(String, String), HandlerError> {
    let project_id = required(&model.project_id, "ProjectId")?;
    let name = required(&model.name, "Name")?;
    Ok((project_id.to_string(), name.to_string()))
}

fn bundle(model: &ClusterModel) -> CredentialBundle {
    CredentialBundle::new(model.api_keys.clone())
        .with_project_id(model.project_id.clone())
        .with_cluster_name(model.name.clone())
}

/// Fetch the cluster once and compare its state against `spec`
async fn poll(
    client: &AtlasClient,
    spec: &PollSpec,
    mut model: ClusterModel,
) -> Result<ProgressEvent<ClusterModel>, HandlerError> {
    let (project_id, name) = coordinates(&model)?;
    let observation = observe(client.clusters().get(&project_id, &name).await, |cluster| {
        Observation::Observed {
            state: cluster.state_name.unwrap_or_default(),
            error_state: None,
        }
    })
    .map_err(|e| HandlerError::atlas(format!("error fetching cluster info ({name})"), e))?;

    let outcome = evaluate(spec, &observation);
    if let PollOutcome::Complete { state } | PollOutcome::Pending { state } = &outcome {
        model.state_name = Some(state.clone());
    }
    info!("Cluster {} poll outcome: {:?}", name, outcome);

    let identifier = model
        .cluster_cfn_identifier
        .clone()
        .unwrap_or_else(|| cluster_identifier(&project_id, &name));
    let subject = PollSubject {
        kind: "cluster",
        identifier: &identifier,
        connection_id: None,
    };
    outcome.into_event(spec, &subject, model)
}

impl ClusterHandler {
    /// Shared tail of create and update: record ids, persist credentials, start polling
    async fn accepted(
        request: &HandlerRequest,
        mut model: ClusterModel,
        remote: crate::atlas::Cluster,
        verb: &str,
    ) -> Result<ProgressEvent<ClusterModel>, HandlerError> {
        let (project_id, name) = coordinates(&model)?;
        let state = remote.state_name.unwrap_or_default();
        if remote.id.is_some() {
            model.id = remote.id;
        }
        model.state_name = Some(state.clone());

        let identifier = cluster_identifier(&project_id, &name);
        model.cluster_cfn_identifier = Some(identifier.clone());
        request
            .persist(ClusterModel::KIND, &identifier, &bundle(&model))
            .await?;

        info!("✅ {} cluster {} accepted, state {}", verb, identifier, state);
        Ok(ProgressEvent::in_progress(
            format!("{verb} Cluster `{state}`"),
            model,
            CLUSTER_INITIATION_DELAY_SECS,
            ContinuationToken::polling(state),
        ))
    }
}

#[async_trait]
impl ResourceHandler for ClusterHandler {
    type Model = ClusterModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<ClusterModel>,
        current: ClusterModel,
    ) -> Result<ProgressEvent<ClusterModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        if request.token().is_polling() {
            return poll(&client, &SETTLE, current).await;
        }

        current.validate("creating")?;
        let (project_id, name) = coordinates(&current)?;
        let remote = client
            .clusters()
            .create(&project_id, &current.to_request())
            .await
            .map_err(|e| HandlerError::atlas(format!("error creating cluster {name}"), e))?;

        Self::accepted(request, current, remote, "Create").await
    }

    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<ClusterModel>,
        mut current: ClusterModel,
    ) -> Result<ProgressEvent<ClusterModel>, HandlerError> {
        let identifier = identifier_of(&current)?.to_string();
        let (client, bundle) = request
            .vaulted_client(ClusterModel::KIND, &identifier)
            .await?;
        let project_id = required(&bundle.project_id, "ProjectId")?;
        let name = required(&bundle.cluster_name, "Name")?;

        let remote = client
            .clusters()
            .get(project_id, name)
            .await
            .map_err(|e| HandlerError::atlas(format!("error fetching cluster info ({name})"), e))?;

        current.apply_remote(remote);
        current.project_id = Some(project_id.to_string());
        current.name = Some(name.to_string());
        Ok(ProgressEvent::success("Read Complete", current))
    }

    async fn update(
        &self,
        request: &HandlerRequest,
        _prev: Option<ClusterModel>,
        current: ClusterModel,
    ) -> Result<ProgressEvent<ClusterModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        if request.token().is_polling() {
            return poll(&client, &SETTLE, current).await;
        }

        current.validate("updating")?;
        let (project_id, name) = coordinates(&current)?;
        let remote = client
            .clusters()
            .update(&project_id, &name, &current.to_request())
            .await
            .map_err(|e| HandlerError::atlas(format!("error updating cluster {name}"), e))?;

        Self::accepted(request, current, remote, "Update").await
    }

    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<ClusterModel>,
        current: ClusterModel,
    ) -> Result<ProgressEvent<ClusterModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        if request.token().is_polling() {
            return poll(&client, &REMOVE, current).await;
        }

        let (project_id, name) = coordinates(&current)?;
        let identifier = current
            .cluster_cfn_identifier
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| cluster_identifier(&project_id, &name));

        let outcome = coordinate_delete(
            client.clusters().delete(&project_id, &name),
            &request.vault(ClusterModel::KIND),
            &identifier,
        )
        .await;

        let on_success = ProgressEvent::in_progress(
            "Delete In Progress",
            current,
            CLUSTER_INITIATION_DELAY_SECS,
            ContinuationToken::polling(STATE_DELETING),
        );
        Ok(outcome.into_event(&identifier, on_success))
    }
}
