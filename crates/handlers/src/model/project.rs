//! # Project Model

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::identifier::ResourceKind;

use super::{non_empty, ApiKeys, ResourceModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_count: Option<i64>,
}

impl ResourceModel for ProjectModel {
    const KIND: ResourceKind = ResourceKind::Project;
    const IDENTIFIER_PROPERTY: &'static str = "Id";

    fn primary_identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl ProjectModel {
    pub fn apply_remote(&mut self, remote: atlas::Project) {
        if let Some(id) = non_empty(remote.id) {
            self.id = Some(id);
        }
        if let Some(name) = non_empty(remote.name) {
            self.name = Some(name);
        }
        if let Some(org_id) = non_empty(remote.org_id) {
            self.org_id = Some(org_id);
        }
        self.created = non_empty(remote.created);
        self.cluster_count = remote.cluster_count;
    }

    /// A listed project, without credentials
    pub fn from_remote(remote: atlas::Project) -> Self {
        let mut model = Self::default();
        model.apply_remote(remote);
        model
    }
}
