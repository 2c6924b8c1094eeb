//! # Dispatch
//!
//! Routes an event to its handler and converts every outcome, including
//! errors and undecodable input, into a wire progress event.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, info_span, Instrument, Span};

use crate::config::HandlerConfig;
use crate::error::HandlerError;
use crate::identifier::ResourceKind;
use crate::model::ResourceModel;
use crate::protocol::{HandlerErrorCode, ProgressEvent};
use crate::resources::{
    ClusterHandler, DatabaseUserHandler, EncryptionAtRestHandler, HandlerRequest,
    NetworkContainerHandler, NetworkPeeringHandler, ProjectHandler, ProjectIpAccessListHandler,
    ResourceHandler,
};
use crate::vault::{ParameterStore, SsmParameterStore};

use super::event::{Action, HandlerEvent, RequestData};

/// Handle one event against AWS Parameter Store
///
/// The Parameter Store client is built for this invocation only, from the
/// caller credentials carried by the event.
pub async fn dispatch(event: HandlerEvent, config: &HandlerConfig) -> Value {
    let region = event
        .region
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| config.default_region.clone());
    let store = SsmParameterStore::new(
        &region,
        event.request_data.caller_credentials.as_ref(),
        config.ssm_endpoint_url.as_deref(),
    )
    .await;
    dispatch_with_store(event, Arc::new(store), config).await
}

/// Handle one event against the given parameter store
pub async fn dispatch_with_store(
    event: HandlerEvent,
    store: Arc<dyn ParameterStore>,
    config: &HandlerConfig,
) -> Value {
    let Some(kind) = ResourceKind::from_type_name(&event.resource_type) else {
        return rejected(format!("unknown resource type `{}`", event.resource_type));
    };
    let action = match event.action.parse::<Action>() {
        Ok(action) => action,
        Err(message) => return rejected(message),
    };

    let request = HandlerRequest::new(store, config.clone())
        .with_callback_context(event.callback_context.unwrap_or_default());
    let span = info_span!(
        "handler.invoke",
        resource.type = %kind.type_name(),
        action = action.as_str(),
        resource.id = tracing::field::Empty,
    );
    let data = &event.request_data;

    async move {
        match kind {
            ResourceKind::Cluster => invoke(&ClusterHandler, action, &request, data).await,
            ResourceKind::DatabaseUser => invoke(&DatabaseUserHandler, action, &request, data).await,
            ResourceKind::EncryptionAtRest => {
                invoke(&EncryptionAtRestHandler, action, &request, data).await
            }
            ResourceKind::NetworkContainer => {
                invoke(&NetworkContainerHandler, action, &request, data).await
            }
            ResourceKind::NetworkPeering => {
                invoke(&NetworkPeeringHandler, action, &request, data).await
            }
            ResourceKind::Project => invoke(&ProjectHandler, action, &request, data).await,
            ResourceKind::ProjectIpAccessList => {
                invoke(&ProjectIpAccessListHandler, action, &request, data).await
            }
        }
    }
    .instrument(span)
    .await
}

fn decode<M: ResourceModel>(value: Option<&Value>, field: &str) -> Result<Option<M>, HandlerError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => M::deserialize(value)
            .map(Some)
            .map_err(|e| HandlerError::InvalidRequest(format!("invalid {field}: {e}"))),
    }
}

async fn invoke<H: ResourceHandler>(
    handler: &H,
    action: Action,
    request: &HandlerRequest,
    data: &RequestData,
) -> Value {
    let models = decode::<H::Model>(data.resource_properties.as_ref(), "resourceProperties")
        .and_then(|current| {
            let prev = decode::<H::Model>(
                data.previous_resource_properties.as_ref(),
                "previousResourceProperties",
            )?;
            Ok((prev, current.unwrap_or_default()))
        });
    let (prev, current) = match models {
        Ok(models) => models,
        Err(e) => return rejected(e.to_string()),
    };
    if let Some(id) = current.primary_identifier() {
        Span::current().record("resource.id", id);
    }

    let result = match action {
        Action::Create => handler.create(request, prev, current).await,
        Action::Read => handler.read(request, prev, current).await,
        Action::Update => handler.update(request, prev, current).await,
        Action::Delete => handler.delete(request, prev, current).await,
        Action::List => handler.list(request, prev, current).await,
    };

    let event = result.unwrap_or_else(|e| {
        error!("❌ {} {} failed: {}", H::Model::KIND, action, e);
        ProgressEvent::failed(e.error_code(), e.to_string())
    });
    info!(
        "{} {} finished with {:?}: {}",
        H::Model::KIND,
        action,
        event.status,
        event.message
    );
    encode(&event)
}

fn rejected(message: String) -> Value {
    error!("Rejecting request: {}", message);
    encode(&ProgressEvent::<Value>::failed(
        HandlerErrorCode::InvalidRequest,
        message,
    ))
}

fn encode<M: Serialize>(event: &ProgressEvent<M>) -> Value {
    serde_json::to_value(event).unwrap_or_else(|e| {
        error!("Failed to encode progress event: {}", e);
        json!({
            "status": "FAILED",
            "errorCode": HandlerErrorCode::InternalFailure.as_str(),
            "message": format!("failed to encode progress event: {e}"),
        })
    })
}
