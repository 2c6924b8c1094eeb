//! # Network Container Model

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::constants::DEFAULT_PROVIDER_NAME;
use crate::identifier::ResourceKind;

use super::{non_empty, ApiKeys, ResourceModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkContainerModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atlas_cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioned: Option<bool>,
}

impl ResourceModel for NetworkContainerModel {
    const KIND: ResourceKind = ResourceKind::NetworkContainer;
    const IDENTIFIER_PROPERTY: &'static str = "Id";

    fn primary_identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl NetworkContainerModel {
    /// Request body with the provider defaulted to AWS
    pub fn to_request(&self) -> atlas::Container {
        atlas::Container {
            atlas_cidr_block: self.atlas_cidr_block.clone(),
            provider_name: Some(
                non_empty(self.provider_name.clone())
                    .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string()),
            ),
            region_name: self.region_name.clone(),
            ..atlas::Container::default()
        }
    }

    pub fn apply_remote(&mut self, remote: atlas::Container) {
        if let Some(id) = non_empty(remote.id) {
            self.id = Some(id);
        }
        if let Some(region_name) = non_empty(remote.region_name) {
            self.region_name = Some(region_name);
        }
        if let Some(cidr) = non_empty(remote.atlas_cidr_block) {
            self.atlas_cidr_block = Some(cidr);
        }
        self.vpc_id = non_empty(remote.vpc_id);
        self.provisioned = remote.provisioned;
    }
}
