//! # Network Peering Handler
//!
//! Asynchronous like clusters, with shorter delays and an error-state check
//! that fails the operation as soon as AWS rejects the connection.

use async_trait::async_trait;
use tracing::info;

use crate::atlas::{AtlasClient, Peer};
use crate::constants::{
    PEERING_ERROR_STATES, PEERING_INITIATION_DELAY_SECS, PEERING_POLL_DELAY_SECS,
    PEERING_STATE_AVAILABLE, PEERING_STATE_FINALIZING, PEERING_STATE_PENDING_ACCEPTANCE,
    STATE_DELETED, STATE_DELETING,
};
use crate::error::HandlerError;
use crate::model::{non_empty, required, NetworkPeeringModel, ResourceModel};
use crate::protocol::{
    coordinate_delete, evaluate, observe, ContinuationToken, Observation, PollSpec, PollSubject,
    ProgressEvent,
};
use crate::vault::CredentialBundle;

use super::{identifier_of, HandlerRequest, ResourceHandler};

const ESTABLISH: PollSpec = PollSpec {
    target_states: &[
        PEERING_STATE_PENDING_ACCEPTANCE,
        PEERING_STATE_FINALIZING,
        PEERING_STATE_AVAILABLE,
    ],
    error_states: &PEERING_ERROR_STATES,
    poll_delay_secs: PEERING_POLL_DELAY_SECS,
};

const REMOVE: PollSpec = PollSpec {
    target_states: &[STATE_DELETED],
    error_states: &PEERING_ERROR_STATES,
    poll_delay_secs: PEERING_POLL_DELAY_SECS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkPeeringHandler;

fn subject(model: &NetworkPeeringModel) -> String {
    PollSubject {
        kind: "peering",
        identifier: model.id.as_deref().unwrap_or_default(),
        connection_id: model.connection_id.as_deref(),
    }
    .to_string()
}

async fn poll(
    client: &AtlasClient,
    spec: &PollSpec,
    mut model: NetworkPeeringModel,
) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
    let project_id = required(&model.project_id, "ProjectId")?.to_string();
    let peer_id = identifier_of(&model)?.to_string();

    let mut observed_connection = None;
    let observation = observe(client.peers().get(&project_id, &peer_id).await, |peer: Peer| {
        observed_connection = non_empty(peer.connection_id);
        Observation::Observed {
            state: peer.status_name.unwrap_or_default(),
            error_state: non_empty(peer.error_state_name),
        }
    })
    .map_err(|e| {
        HandlerError::atlas(format!("error fetching network peering info ({peer_id})"), e)
    })?;

    if observed_connection.is_some() {
        model.connection_id = observed_connection;
    }
    if let Observation::Observed { state, error_state } = &observation {
        model.status_name = Some(state.clone());
        model.error_state_name.clone_from(error_state);
    }

    let outcome = evaluate(spec, &observation);
    info!("Peering {} poll outcome: {:?}", peer_id, outcome);
    let connection_id = model.connection_id.clone();
    let subject = PollSubject {
        kind: "peering",
        identifier: &peer_id,
        connection_id: connection_id.as_deref(),
    };
    outcome.into_event(spec, &subject, model)
}

fn bundle(model: &NetworkPeeringModel) -> CredentialBundle {
    CredentialBundle::new(model.api_keys.clone()).with_project_id(model.project_id.clone())
}

/// Persist credentials under the peer id and hand the rest to the pollers
async fn accepted(
    request: &HandlerRequest,
    mut model: NetworkPeeringModel,
    remote: Peer,
    message: &str,
) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
    let state = remote.status_name.clone().unwrap_or_default();
    model.apply_remote(remote);
    let peer_id = identifier_of(&model)?.to_string();
    request
        .persist(NetworkPeeringModel::KIND, &peer_id, &bundle(&model))
        .await?;

    info!("🔗 Peering {} accepted, status {}", peer_id, state);
    Ok(ProgressEvent::in_progress(
        message,
        model,
        PEERING_INITIATION_DELAY_SECS,
        ContinuationToken::polling(state),
    ))
}

#[async_trait]
impl ResourceHandler for NetworkPeeringHandler {
    type Model = NetworkPeeringModel;

    async fn create(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkPeeringModel>,
        current: NetworkPeeringModel,
    ) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        if request.token().is_polling() {
            return poll(&client, &ESTABLISH, current).await;
        }

        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let body = current.to_create_request()?;
        let remote = client
            .peers()
            .create(&project_id, &body)
            .await
            .map_err(|e| HandlerError::atlas("error creating network peering", e))?;

        accepted(request, current, remote, "Create complete").await
    }

    async fn read(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkPeeringModel>,
        mut current: NetworkPeeringModel,
    ) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
        let peer_id = identifier_of(&current)?.to_string();
        let (client, bundle) = request
            .vaulted_client(NetworkPeeringModel::KIND, &peer_id)
            .await?;
        let project_id = required(&bundle.project_id, "ProjectId")?;

        let remote = client.peers().get(project_id, &peer_id).await.map_err(|e| {
            HandlerError::atlas(
                format!("error reading peer with id(project: {project_id}, peer: {peer_id})"),
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
        _prev: Option<NetworkPeeringModel>,
        current: NetworkPeeringModel,
    ) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        if request.token().is_polling() {
            return poll(&client, &ESTABLISH, current).await;
        }

        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let peer_id = identifier_of(&current)?.to_string();
        let remote = client
            .peers()
            .update(&project_id, &peer_id, &current.to_update_request())
            .await
            .map_err(|e| {
                HandlerError::atlas(
                    format!("error updating peer with id(project: {project_id}, peer: {peer_id})"),
                    e,
                )
            })?;

        accepted(request, current, remote, "Update Complete").await
    }

    async fn delete(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkPeeringModel>,
        current: NetworkPeeringModel,
    ) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        if request.token().is_polling() {
            return poll(&client, &REMOVE, current).await;
        }

        let project_id = required(&current.project_id, "ProjectId")?.to_string();
        let peer_id = identifier_of(&current)?.to_string();
        let outcome = coordinate_delete(
            client.peers().delete(&project_id, &peer_id),
            &request.vault(NetworkPeeringModel::KIND),
            &peer_id,
        )
        .await;

        let subject = subject(&current);
        let on_success = ProgressEvent::in_progress(
            "Delete Complete",
            current,
            PEERING_INITIATION_DELAY_SECS,
            ContinuationToken::polling(STATE_DELETING),
        );
        Ok(outcome.into_event(&subject, on_success))
    }

    /// Every peering of the project
    async fn list(
        &self,
        request: &HandlerRequest,
        _prev: Option<NetworkPeeringModel>,
        current: NetworkPeeringModel,
    ) -> Result<ProgressEvent<NetworkPeeringModel>, HandlerError> {
        let client = request.atlas_client(current.api_keys.as_ref())?;
        let project_id = required(&current.project_id, "ProjectId")?;
        let peers = client.peers().list(project_id).await.map_err(|e| {
            HandlerError::atlas(format!("error listing peers of project {project_id}"), e)
        })?;

        let models = peers
            .into_iter()
            .map(|peer| NetworkPeeringModel::from_remote(project_id, peer))
            .collect();
        Ok(ProgressEvent::listed("List Complete", models))
    }
}
