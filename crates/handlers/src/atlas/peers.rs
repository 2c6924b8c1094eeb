//! # Network Peering Connections
//!
//! `/groups/{groupId}/peers`

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError, Paginated};

/// An AWS VPC peering connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepter_region_name: Option<String>,
    #[serde(rename = "awsAccountId", default, skip_serializing_if = "Option::is_none")]
    pub aws_account_id: Option<String>,
    #[serde(rename = "routeTableCidrBlock", default, skip_serializing_if = "Option::is_none")]
    pub route_table_cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    /// AWS-side peering connection id (`pcx-...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_state_name: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Peers<'a> {
    client: &'a AtlasClient,
}

impl<'a> Peers<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, group_id: &str, peer: &Peer) -> Result<Peer, AtlasError> {
        self.client.post(&atlas::peers(group_id), peer).await
    }

    pub async fn get(&self, group_id: &str, peer_id: &str) -> Result<Peer, AtlasError> {
        self.client.get(&atlas::peer(group_id, peer_id)).await
    }

    pub async fn list(&self, group_id: &str) -> Result<Vec<Peer>, AtlasError> {
        let page: Paginated<Peer> = self.client.get(&atlas::peers(group_id)).await?;
        Ok(page.results)
    }

    pub async fn update(&self, group_id: &str, peer_id: &str, peer: &Peer) -> Result<Peer, AtlasError> {
        self.client.patch(&atlas::peer(group_id, peer_id), peer).await
    }

    pub async fn delete(&self, group_id: &str, peer_id: &str) -> Result<(), AtlasError> {
        self.client.delete(&atlas::peer(group_id, peer_id)).await
    }
}
