//! # Project IP Access List
//!
//! `/groups/{groupId}/accessList`

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError, Paginated};

/// One access list entry: exactly one of IP address, CIDR block or security group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_security_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AccessList<'a> {
    client: &'a AtlasClient,
}

impl<'a> AccessList<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    /// Add entries in one call; Atlas answers with the whole access list
    pub async fn create(
        &self,
        group_id: &str,
        entries: &[AccessListEntry],
    ) -> Result<Vec<AccessListEntry>, AtlasError> {
        let page: Paginated<AccessListEntry> = self
            .client
            .post(&atlas::access_list(group_id), &entries)
            .await?;
        Ok(page.results)
    }

    /// `entry` is an IP address, CIDR block or security group id
    pub async fn get(&self, group_id: &str, entry: &str) -> Result<AccessListEntry, AtlasError> {
        self.client
            .get(&atlas::access_list_entry(group_id, entry))
            .await
    }

    pub async fn delete(&self, group_id: &str, entry: &str) -> Result<(), AtlasError> {
        self.client
            .delete(&atlas::access_list_entry(group_id, entry))
            .await
    }
}
