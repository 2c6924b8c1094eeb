//! # Project IP Access List Model
//!
//! A set of access list entries managed as one resource. Atlas assigns no id
//! to the set, so the primary identifier is generated on Create.

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::identifier::ResourceKind;

use super::{non_empty, ApiKeys, ResourceModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectIpAccessListModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_list: Option<Vec<AccessListDefinition>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessListDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_security_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl AccessListDefinition {
    /// Path key of the entry: IP address, else CIDR block, else security group
    pub fn entry_key(&self) -> Option<&str> {
        [&self.ip_address, &self.cidr_block, &self.aws_security_group]
            .into_iter()
            .find_map(|v| v.as_deref().filter(|v| !v.is_empty()))
    }

    fn to_request(&self, project_id: &str) -> atlas::AccessListEntry {
        atlas::AccessListEntry {
            group_id: Some(project_id.to_string()),
            ip_address: non_empty(self.ip_address.clone()),
            cidr_block: non_empty(self.cidr_block.clone()),
            aws_security_group: non_empty(self.aws_security_group.clone()),
            comment: non_empty(self.comment.clone()),
        }
    }

    pub fn from_remote(remote: atlas::AccessListEntry) -> Self {
        Self {
            ip_address: non_empty(remote.ip_address),
            cidr_block: non_empty(remote.cidr_block),
            aws_security_group: non_empty(remote.aws_security_group),
            comment: non_empty(remote.comment),
            project_id: non_empty(remote.group_id),
        }
    }
}

impl ResourceModel for ProjectIpAccessListModel {
    const KIND: ResourceKind = ResourceKind::ProjectIpAccessList;
    const IDENTIFIER_PROPERTY: &'static str = "Id";

    fn primary_identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl ProjectIpAccessListModel {
    pub fn entries(&self) -> &[AccessListDefinition] {
        self.access_list.as_deref().unwrap_or_default()
    }

    /// Entry keys in declaration order, skipping entries that carry none
    pub fn entry_keys(&self) -> Vec<&str> {
        self.entries()
            .iter()
            .filter_map(AccessListDefinition::entry_key)
            .collect()
    }

    pub fn to_request(&self, project_id: &str) -> Vec<atlas::AccessListEntry> {
        self.entries()
            .iter()
            .map(|entry| entry.to_request(project_id))
            .collect()
    }
}
