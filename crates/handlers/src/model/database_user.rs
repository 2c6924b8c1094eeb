//! # Database User Model
//!
//! `MongoDB::StpAtlasV1::DatabaseUser`

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::identifier::ResourceKind;

use super::{non_empty, ApiKeys, ResourceModel};

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseUserModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<ScopeDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelDefinition>>,
    #[serde(rename = "AwsIAMType", default, skip_serializing_if = "Option::is_none")]
    pub aws_iam_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_cfn_identifier: Option<String>,
}

impl std::fmt::Debug for DatabaseUserModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseUserModel")
            .field("project_id", &self.project_id)
            .field("username", &self.username)
            .field("database_name", &self.database_name)
            .field("roles", &self.roles)
            .field("scopes", &self.scopes)
            .field("labels", &self.labels)
            .field("aws_iam_type", &self.aws_iam_type)
            .field("ldap_auth_type", &self.ldap_auth_type)
            .field("user_cfn_identifier", &self.user_cfn_identifier)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScopeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ResourceModel for DatabaseUserModel {
    const KIND: ResourceKind = ResourceKind::DatabaseUser;
    const IDENTIFIER_PROPERTY: &'static str = "UserCfnIdentifier";

    fn primary_identifier(&self) -> Option<&str> {
        self.user_cfn_identifier.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl DatabaseUserModel {
    /// Request body for create and update
    ///
    /// Roles without a name and scopes or labels missing either half are skipped.
    pub fn to_request(&self, project_id: &str) -> atlas::DatabaseUser {
        let roles = self
            .roles
            .iter()
            .flatten()
            .filter_map(|r| {
                Some(atlas::Role {
                    role_name: r.role_name.clone()?,
                    database_name: r.database_name.clone(),
                    collection_name: r.collection_name.clone(),
                })
            })
            .collect();
        let scopes = self
            .scopes
            .iter()
            .flatten()
            .filter_map(|s| {
                Some(atlas::Scope {
                    name: s.name.clone()?,
                    scope_type: s.scope_type.clone()?,
                })
            })
            .collect();
        let labels = self
            .labels
            .iter()
            .flatten()
            .filter_map(|l| {
                Some(atlas::Label {
                    key: l.key.clone()?,
                    value: l.value.clone()?,
                })
            })
            .collect();

        atlas::DatabaseUser {
            database_name: self.database_name.clone(),
            group_id: Some(project_id.to_string()),
            username: self.username.clone(),
            password: self.password.clone(),
            roles,
            scopes,
            labels,
            aws_iam_type: self.aws_iam_type.clone(),
            ldap_auth_type: self.ldap_auth_type.clone(),
        }
    }

    /// Reflect roles, scopes, labels and auth types reported by Atlas
    pub fn apply_remote(&mut self, remote: atlas::DatabaseUser) {
        self.roles = Some(
            remote
                .roles
                .into_iter()
                .map(|r| RoleDefinition {
                    role_name: Some(r.role_name),
                    database_name: non_empty(r.database_name),
                    collection_name: non_empty(r.collection_name),
                })
                .collect(),
        );
        self.scopes = Some(
            remote
                .scopes
                .into_iter()
                .map(|s| ScopeDefinition {
                    name: Some(s.name),
                    scope_type: Some(s.scope_type),
                })
                .collect(),
        );
        self.labels = Some(
            remote
                .labels
                .into_iter()
                .map(|l| LabelDefinition {
                    key: Some(l.key),
                    value: Some(l.value),
                })
                .collect(),
        );
        self.aws_iam_type = non_empty(remote.aws_iam_type);
        self.ldap_auth_type = non_empty(remote.ldap_auth_type);
        if let Some(username) = non_empty(remote.username) {
            self.username = Some(username);
        }
        if let Some(database_name) = non_empty(remote.database_name) {
            self.database_name = Some(database_name);
        }
    }
}
