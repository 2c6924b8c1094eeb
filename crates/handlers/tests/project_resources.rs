//! Project-Scoped Resource Integration Tests
//!
//! Projects, database users, IP access lists and encryption at rest all
//! complete within one invocation.

mod common;

use common::{api, api_keys, model, request, MemoryParameterStore};
use handlers::model::{
    DatabaseUserModel, EncryptionAtRestModel, ProjectIpAccessListModel, ProjectModel,
};
use handlers::resources::{
    DatabaseUserHandler, EncryptionAtRestHandler, ProjectHandler, ProjectIpAccessListHandler,
};
use handlers::{HandlerErrorCode, OperationStatus, ResourceHandler};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sent_body(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

// Projects

#[tokio::test]
async fn test_project_create_persists_keys_under_project_id() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("POST"))
        .and(path(api("/groups")))
        .and(body_partial_json(json!({"name": "Dev", "orgId": "O1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "P1",
            "name": "Dev",
            "orgId": "O1",
            "created": "2026-10-16T08:00:00Z",
            "clusterCount": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let current: ProjectModel =
        model(json!({"ApiKeys": api_keys(), "Name": "Dev", "OrgId": "O1"}));
    let event = ProjectHandler
        .create(&request(&server, &store), None, current)
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    let model = event.resource_model.unwrap();
    assert_eq!(model.id.as_deref(), Some("P1"));
    assert_eq!(model.cluster_count, Some(0));
    assert_eq!(
        store.value("mongodbstpatlasv1project-P1"),
        Some(json!({"ApiKeys": api_keys()}))
    );
}

#[tokio::test]
async fn test_project_create_requires_org() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();

    let current: ProjectModel = model(json!({"ApiKeys": api_keys(), "Name": "Dev"}));
    let err = ProjectHandler
        .create(&request(&server, &store), None, current)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "required property `OrgId` is missing");
}

#[tokio::test]
async fn test_project_update_rotates_persisted_keys_only() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed("mongodbstpatlasv1project-P1", &json!({"ApiKeys": api_keys()}));
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let rotated = json!({"PublicKey": "pub2", "PrivateKey": "priv2"});
    let current: ProjectModel = model(json!({"ApiKeys": rotated.clone(), "Name": "Dev"}));
    let previous: ProjectModel = model(json!({"Id": "P1", "Name": "Dev"}));
    let event = ProjectHandler
        .update(&request(&server, &store), Some(previous), current)
        .await
        .unwrap();

    assert_eq!(event.message, "Update Complete");
    assert_eq!(event.resource_model.unwrap().id.as_deref(), Some("P1"));
    assert_eq!(
        store.value("mongodbstpatlasv1project-P1"),
        Some(json!({"ApiKeys": rotated}))
    );
}

#[tokio::test]
async fn test_project_list_reads_first_page() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("GET"))
        .and(path(api("/groups")))
        .and(query_param("pageNum", "1"))
        .and(query_param("itemsPerPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "P1", "name": "Dev"}, {"id": "P2", "name": "Prod"}],
            "totalCount": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let current: ProjectModel = model(json!({"ApiKeys": api_keys()}));
    let event = ProjectHandler
        .list(&request(&server, &store), None, current)
        .await
        .unwrap();

    let names: Vec<_> = event
        .resource_models
        .unwrap()
        .into_iter()
        .map(|m| m.name.unwrap())
        .collect();
    assert_eq!(names, ["Dev", "Prod"]);
}

// Database users

fn database_user() -> DatabaseUserModel {
    model(json!({
        "ApiKeys": api_keys(),
        "ProjectId": "P1",
        "Username": "Alice",
        "DatabaseName": "admin",
        "Password": "s3cret",
        "Roles": [{"RoleName": "readWrite", "DatabaseName": "app"}, {"DatabaseName": "orphan"}],
        "Labels": [{"Key": "team", "Value": "data"}]
    }))
}

#[tokio::test]
async fn test_database_user_create_skips_incomplete_roles() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("POST"))
        .and(path(api("/groups/P1/databaseUsers")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "username": "Alice",
            "databaseName": "admin",
            "groupId": "P1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = DatabaseUserHandler
        .create(&request(&server, &store), None, database_user())
        .await
        .unwrap();

    assert_eq!(event.message, "Create Complete");
    assert_eq!(
        event.resource_model.unwrap().user_cfn_identifier.as_deref(),
        Some("user-alice-P1")
    );
    assert_eq!(
        store.value("mongodbstpatlasv1databaseuser-user-alice-P1"),
        Some(json!({
            "ApiKeys": api_keys(),
            "ProjectId": "P1",
            "Username": "Alice",
            "DatabaseName": "admin"
        }))
    );

    let received = server.received_requests().await.unwrap();
    let body = sent_body(&received[0]);
    assert_eq!(body["groupId"], "P1");
    assert_eq!(body["roles"], json!([{"roleName": "readWrite", "databaseName": "app"}]));
    assert_eq!(body["labels"], json!([{"key": "team", "value": "data"}]));
}

#[tokio::test]
async fn test_database_user_delete_treats_missing_user_as_deleted() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(
        "mongodbstpatlasv1databaseuser-user-alice-P1",
        &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}),
    );
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/databaseUsers/admin/Alice")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"errorCode": "USERNAME_NOT_FOUND"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = DatabaseUserHandler
        .delete(&request(&server, &store), None, database_user())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(event.message, "Delete Complete");
    assert!(!store.contains("mongodbstpatlasv1databaseuser-user-alice-P1"));
}

#[tokio::test]
async fn test_database_user_read_addresses_user_from_bundle() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(
        "mongodbstpatlasv1databaseuser-user-alice-P1",
        &json!({
            "ApiKeys": api_keys(),
            "ProjectId": "P1",
            "Username": "Alice",
            "DatabaseName": "admin"
        }),
    );
    Mock::given(method("GET"))
        .and(path(api("/groups/P1/databaseUsers/admin/Alice")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "Alice",
            "databaseName": "admin",
            "roles": [{"roleName": "read", "databaseName": "app"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let current: DatabaseUserModel = model(json!({"UserCfnIdentifier": "user-alice-P1"}));
    let event = DatabaseUserHandler
        .read(&request(&server, &store), None, current)
        .await
        .unwrap();

    let model = event.resource_model.unwrap();
    let roles = model.roles.unwrap();
    assert_eq!(roles[0].role_name.as_deref(), Some("read"));
    assert_eq!(model.project_id.as_deref(), Some("P1"));
}

// IP access lists

fn access_list() -> ProjectIpAccessListModel {
    model(json!({
        "ApiKeys": api_keys(),
        "ProjectId": "P1",
        "AccessList": [
            {"IpAddress": "203.0.113.5", "Comment": "office"},
            {"CidrBlock": "10.0.0.0/16"}
        ]
    }))
}

#[tokio::test]
async fn test_access_list_create_assigns_identifier() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("POST"))
        .and(path(api("/groups/P1/accessList")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let event = ProjectIpAccessListHandler
        .create(&request(&server, &store), None, access_list())
        .await
        .unwrap();

    let id = event.resource_model.unwrap().id.unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(
        store.value(&format!("mongodbstpatlasv1projectipaccesslist-{id}")),
        Some(json!({"ApiKeys": api_keys(), "ProjectId": "P1"}))
    );

    let received = server.received_requests().await.unwrap();
    let body = sent_body(&received[0]);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["ipAddress"], "203.0.113.5");
    assert_eq!(body[1]["cidrBlock"], "10.0.0.0/16");
}

#[tokio::test]
async fn test_access_list_delete_attempts_every_entry() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(
        "mongodbstpatlasv1projectipaccesslist-list-1",
        &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}),
    );
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/accessList/203.0.113.5")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/accessList/10.0.0.0%2F16")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut current = access_list();
    current.id = Some("list-1".to_string());
    let event = ProjectIpAccessListHandler
        .delete(&request(&server, &store), None, current)
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Failed);
    assert!(event.message.starts_with("resource delete failed for list-1"));
    assert!(!store.contains("mongodbstpatlasv1projectipaccesslist-list-1"));
}

#[tokio::test]
async fn test_access_list_update_replaces_previous_entries() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("DELETE"))
        .and(path(api("/groups/P1/accessList/198.51.100.7")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api("/groups/P1/accessList")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let previous: ProjectIpAccessListModel = model(json!({
        "Id": "list-1",
        "ProjectId": "P1",
        "AccessList": [{"IpAddress": "198.51.100.7"}]
    }));
    let event = ProjectIpAccessListHandler
        .update(&request(&server, &store), Some(previous), access_list())
        .await
        .unwrap();

    assert_eq!(event.message, "Update Complete");
    assert_eq!(event.resource_model.unwrap().id.as_deref(), Some("list-1"));
    assert!(store.contains("mongodbstpatlasv1projectipaccesslist-list-1"));
}

#[tokio::test]
async fn test_access_list_update_without_identifier_leaves_atlas_untouched() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let previous: ProjectIpAccessListModel = model(json!({
        "ProjectId": "P1",
        "AccessList": [{"IpAddress": "198.51.100.7"}]
    }));
    let err = ProjectIpAccessListHandler
        .update(&request(&server, &store), Some(previous), access_list())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), HandlerErrorCode::InvalidRequest);
    assert_eq!(err.to_string(), "required property `Id` is missing");
    assert_eq!(store.len(), 0);
}

// Encryption at rest

fn encryption() -> EncryptionAtRestModel {
    model(json!({
        "ApiKeys": api_keys(),
        "ProjectId": "P1",
        "AwsKms": {
            "AccessKeyID": "AKIAKMS",
            "SecretAccessKey": "kms-secret",
            "CustomerMasterKeyID": "cmk-1",
            "Enabled": true,
            "Region": "US_EAST_1"
        }
    }))
}

#[tokio::test]
async fn test_encryption_create_applies_key_configuration() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    Mock::given(method("PATCH"))
        .and(path(api("/groups/P1/encryptionAtRest")))
        .and(body_partial_json(json!({
            "awsKms": {"enabled": true, "customerMasterKeyID": "cmk-1", "accessKeyID": "AKIAKMS"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "awsKms": {"enabled": true, "customerMasterKeyID": "cmk-1", "region": "US_EAST_1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = EncryptionAtRestHandler
        .create(&request(&server, &store), None, encryption())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(
        event.resource_model.unwrap().cfn_primary_identifier.as_deref(),
        Some("P1-encryptionatrest")
    );
    assert!(store.contains("mongodbstpatlasv1encryptionatrest-P1-encryptionatrest"));
}

#[tokio::test]
async fn test_encryption_requires_kms_block() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();

    let mut current = encryption();
    current.aws_kms = None;
    let err = EncryptionAtRestHandler
        .create(&request(&server, &store), None, current)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), HandlerErrorCode::InvalidRequest);
}

#[tokio::test]
async fn test_encryption_delete_disables_the_key() {
    let server = MockServer::start().await;
    let store = MemoryParameterStore::new();
    store.seed(
        "mongodbstpatlasv1encryptionatrest-P1-encryptionatrest",
        &json!({"ApiKeys": api_keys(), "ProjectId": "P1"}),
    );
    Mock::given(method("PATCH"))
        .and(path(api("/groups/P1/encryptionAtRest")))
        .and(body_partial_json(json!({"awsKms": {"enabled": false}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"awsKms": {"enabled": false}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = EncryptionAtRestHandler
        .delete(&request(&server, &store), None, encryption())
        .await
        .unwrap();

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(store.len(), 0);
}
