//! # Database Users
//!
//! `/groups/{groupId}/databaseUsers`

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError};

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<Scope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(rename = "awsIAMType", default, skip_serializing_if = "Option::is_none")]
    pub aws_iam_type: Option<String>,
    #[serde(rename = "ldapAuthType", default, skip_serializing_if = "Option::is_none")]
    pub ldap_auth_type: Option<String>,
}

impl std::fmt::Debug for DatabaseUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseUser")
            .field("database_name", &self.database_name)
            .field("group_id", &self.group_id)
            .field("username", &self.username)
            .field("roles", &self.roles)
            .field("scopes", &self.scopes)
            .field("labels", &self.labels)
            .field("aws_iam_type", &self.aws_iam_type)
            .field("ldap_auth_type", &self.ldap_auth_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    #[serde(rename = "type")]
    pub scope_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy)]
pub struct DatabaseUsers<'a> {
    client: &'a AtlasClient,
}

impl<'a> DatabaseUsers<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, group_id: &str, user: &DatabaseUser) -> Result<DatabaseUser, AtlasError> {
        self.client.post(&atlas::database_users(group_id), user).await
    }

    pub async fn get(
        &self,
        group_id: &str,
        database_name: &str,
        username: &str,
    ) -> Result<DatabaseUser, AtlasError> {
        self.client
            .get(&atlas::database_user(group_id, database_name, username))
            .await
    }

    pub async fn update(
        &self,
        group_id: &str,
        database_name: &str,
        username: &str,
        user: &DatabaseUser,
    ) -> Result<DatabaseUser, AtlasError> {
        self.client
            .patch(&atlas::database_user(group_id, database_name, username), user)
            .await
    }

    pub async fn delete(
        &self,
        group_id: &str,
        database_name: &str,
        username: &str,
    ) -> Result<(), AtlasError> {
        self.client
            .delete(&atlas::database_user(group_id, database_name, username))
            .await
    }
}
