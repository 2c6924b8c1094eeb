//! # Network Containers
//!
//! `/groups/{groupId}/containers`

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "atlasCidrBlock", default, skip_serializing_if = "Option::is_none")]
    pub atlas_cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioned: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct Containers<'a> {
    client: &'a AtlasClient,
}

impl<'a> Containers<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, group_id: &str, container: &Container) -> Result<Container, AtlasError> {
        self.client.post(&atlas::containers(group_id), container).await
    }

    pub async fn get(&self, group_id: &str, container_id: &str) -> Result<Container, AtlasError> {
        self.client.get(&atlas::container(group_id, container_id)).await
    }

    pub async fn update(
        &self,
        group_id: &str,
        container_id: &str,
        container: &Container,
    ) -> Result<Container, AtlasError> {
        self.client
            .patch(&atlas::container(group_id, container_id), container)
            .await
    }

    pub async fn delete(&self, group_id: &str, container_id: &str) -> Result<(), AtlasError> {
        self.client
            .delete(&atlas::container(group_id, container_id))
            .await
    }
}
