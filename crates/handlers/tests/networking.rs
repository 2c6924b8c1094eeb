//! Network Container and Peering Integration Tests
//!
//! Peerings follow the asynchronous protocol with an error-state check;
//! containers complete in one invocation.

mod common;

use common::{api, api_keys, model, request, resumed, MemoryParameterStore};
use handlers::model::{NetworkContainerModel, NetworkPeeringModel};
use handlers::resources::{NetworkContainerHandler, NetworkPeeringHandler};
use handlers::{HandlerErrorCode, OperationStatus, ResourceHandler};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PEERING_BUNDLE: &str = "mongodbstpatlasv1networkpeering-pe-1";
const CONTAINER_BUNDLE: &str = "mongodbstpatlasv1networkcontainer-ct-1";

fn peering() -> NetworkPeeringModel {
    model(json!({
        "ApiKeys": api_keys(),
        "ProjectId": "P1",
        "ContainerId": "ct-1",
        "AccepterRegionName": "us-east-1",
        "AwsAccountId": "123456789012",
        "RouteTableCidrBlock": "10.0.0.0/16",
        "VpcId": "vpc-1"
    }))
}

fn created_peering() -> NetworkPeeringModel {
    let mut model = peering();
    model.id = Some("pe-1".to_string());
    model
}

async fn mount_peer(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api("/groups/P1/peers/pe-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_peering_create_is_accepted() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("POST"))
        .and(path(api("/groups/P1/peers")))
        .and(body_partial_json(json!({
            "containerId": "ct-1",
            "providerName": "AWS",
            "vpcId": "vpc-1"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "pe-1", "statusName": "INITIATING"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = NetworkPeeringHandler
        .create(&request(&server, &store), None, peering())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::InProgress);
    assert_eq!(event.message, "Create complete");
    assert_eq!(event.callback_delay_seconds, Some(10));
    assert_eq!(event.continuation().state(), Some("INITIATING"));
    assert_eq!(event.resource_model.unwrap().id.as_deref(), Some("pe-1"));
    assert_eq!(
        store.value(PEERING_BUNDLE),
        Some(json!({"ApiKeys": api_keys(), "ProjectId": "P1"}))
    );
}

#[tokio::test]
async fn test_peering_create_requires_vpc() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    let mut current = peering();
    current.vpc_id = None;

    let err = NetworkPeeringHandler
        .create(&request(&server, &store), None, current)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), HandlerErrorCode::InvalidRequest);
    assert_eq!(err.to_string(), "required property `VpcId` is missing");
}

#[tokio::test]
async fn test_peering_poll_completes_on_pending_acceptance() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    mount_peer(
        &server,
        json!({"id": "pe-1", "statusName": "PENDING_ACCEPTANCE", "connectionId": "pcx-1"}),
    )
    .await;

    let event = NetworkPeeringHandler
        .create(&resumed(&server, &store, "INITIATING"), None, created_peering())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    let model = event.resource_model.unwrap();
    assert_eq!(model.status_name.as_deref(), Some("PENDING_ACCEPTANCE"));
    assert_eq!(model.connection_id.as_deref(), Some("pcx-1"));
}

#[tokio::test]
async fn test_resumed_peering_update_completes_when_finalizing() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_peer(
        &server,
        json!({"id": "pe-1", "statusName": "FINALIZING", "connectionId": "pcx-1"}),
    )
    .await;

    let event = NetworkPeeringHandler
        .update(&resumed(&server, &store, "INITIATING"), Some(created_peering()), created_peering())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert!(event.callback_context.is_empty());
    let model = event.resource_model.unwrap();
    assert_eq!(model.status_name.as_deref(), Some("FINALIZING"));
    assert_eq!(model.connection_id.as_deref(), Some("pcx-1"));
}

#[tokio::test]
async fn test_peering_poll_keeps_waiting_while_initiating() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    mount_peer(&server, json!({"id": "pe-1", "statusName": "INITIATING"})).await;

    let event = NetworkPeeringHandler
        .update(&resumed(&server, &store, "INITIATING"), None, created_peering())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::InProgress);
    assert_eq!(event.callback_delay_seconds, Some(15));
    assert_eq!(event.continuation().state(), Some("INITIATING"));
}

#[tokio::test]
async fn test_peering_error_state_fails_the_operation() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    mount_peer(
        &server,
        json!({
            "id": "pe-1",
            "statusName": "FAILED",
            "errorStateName": "REJECTED",
            "connectionId": "pcx-1"
        }),
    )
    .await;

    let err = NetworkPeeringHandler
        .create(&resumed(&server, &store, "INITIATING"), None, created_peering())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), HandlerErrorCode::NotStabilized);
    assert_eq!(
        err.to_string(),
        "peering pe-1 (connection pcx-1) is in error state REJECTED"
    );
}

#[tokio::test]
async fn test_peering_delete_then_poll_until_gone() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(PEERING_BUNDLE, &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}));
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/peers/pe-1")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let event = NetworkPeeringHandler
        .delete(&request(&server, &store), None, created_peering())
        .await
        .unwrap();
    assert_eq!(event.status, OperationStatus::InProgress);
    assert_eq!(event.message, "Delete Complete");
    assert_eq!(event.continuation().state(), Some("DELETING"));
    assert!(!store.contains(PEERING_BUNDLE));

    server.reset().await;
    Mock::given(method("GET"))
        .and(path(api("/groups/P1/peers/pe-1")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let event = NetworkPeeringHandler
        .delete(&resumed(&server, &store, "DELETING"), None, created_peering())
        .await
        .unwrap();
    assert_eq!(event.status, OperationStatus::Success);
}

#[tokio::test]
async fn test_peering_delete_failure_names_the_connection() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(PEERING_BUNDLE, &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}));
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/peers/pe-1")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"detail": "busy"})))
        .mount(&server)
        .await;

    let mut current = created_peering();
    current.connection_id = Some("pcx-1".to_string());
    let event = NetworkPeeringHandler
        .delete(&request(&server, &store), None, current)
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Failed);
    assert!(event
        .message
        .starts_with("resource delete failed for peering pe-1 (connection pcx-1)"));
}

#[tokio::test]
async fn test_peering_list_returns_every_peer() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("GET"))
        .and(path(api("/groups/P1/peers")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "pe-1", "statusName": "AVAILABLE", "vpcId": "vpc-1"},
                {"id": "pe-2", "statusName": "PENDING_ACCEPTANCE", "vpcId": "vpc-2"}
            ],
            "totalCount": 2
        })))
        .mount(&server)
        .await;

    let event = NetworkPeeringHandler
        .list(&request(&server, &store), None, peering())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    let models = event.resource_models.unwrap();
    let ids: Vec<_> = models.iter().map(|m| m.id.as_deref().unwrap()).collect();
    assert_eq!(ids, ["pe-1", "pe-2"]);
    assert!(models.iter().all(|m| m.project_id.as_deref() == Some("P1")));
}

fn container() -> NetworkContainerModel {
    model(json!({
        "ApiKeys": api_keys(),
        "ProjectId": "P1",
        "RegionName": "US_EAST_1",
        "AtlasCidrBlock": "192.168.248.0/21"
    }))
}

#[tokio::test]
async fn test_container_create_defaults_provider_to_aws() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("POST"))
        .and(path(api("/groups/P1/containers")))
        .and(body_partial_json(json!({
            "providerName": "AWS",
            "atlasCidrBlock": "192.168.248.0/21",
            "regionName": "US_EAST_1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ct-1",
            "providerName": "AWS",
            "atlasCidrBlock": "192.168.248.0/21",
            "regionName": "US_EAST_1",
            "provisioned": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = NetworkContainerHandler
        .create(&request(&server, &store), None, container())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(event.message, "Create complete");
    let model = event.resource_model.unwrap();
    assert_eq!(model.id.as_deref(), Some("ct-1"));
    assert_eq!(model.provisioned, Some(false));
    assert!(store.contains(CONTAINER_BUNDLE));
}

#[tokio::test]
async fn test_container_read_uses_persisted_project() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(CONTAINER_BUNDLE, &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}));
    Mock::given(method("GET"))
        .and(path(api("/groups/P1/containers/ct-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ct-1",
            "vpcId": "vpc-9",
            "provisioned": true
        })))
        .mount(&server)
        .await;

    let current: NetworkContainerModel = model(json!({"Id": "ct-1"}));
    let event = NetworkContainerHandler
        .read(&request(&server, &store), None, current)
        .await
        .unwrap();

    let model = event.resource_model.unwrap();
    assert_eq!(model.project_id.as_deref(), Some("P1"));
    assert_eq!(model.vpc_id.as_deref(), Some("vpc-9"));
    assert_eq!(model.provisioned, Some(true));
}

#[tokio::test]
async fn test_container_list_is_empty() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();

    let event = NetworkContainerHandler
        .list(&request(&server, &store), None, container())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(event.resource_models.map(|m| m.len()), Some(0));
}

#[tokio::test]
async fn test_container_delete_removes_bundle() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(CONTAINER_BUNDLE, &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}));
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/containers/ct-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut current = container();
    current.id = Some("ct-1".to_string());
    let event = NetworkContainerHandler
        .delete(&request(&server, &store), None, current)
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(event.message, "Delete Complete");
    assert!(!store.contains(CONTAINER_BUNDLE));
}
