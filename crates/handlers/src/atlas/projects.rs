//! # Projects
//!
//! `/groups` (Atlas calls projects "groups" in the v1.0 API).

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError, Paginated};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_count: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    client: &'a AtlasClient,
}

impl<'a> Projects<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, project: &Project) -> Result<Project, AtlasError> {
        self.client.post(&atlas::projects(), project).await
    }

    pub async fn get(&self, project_id: &str) -> Result<Project, AtlasError> {
        self.client.get(&atlas::project(project_id)).await
    }

    /// One page of projects visible to the API key
    pub async fn list(&self, page_num: u32, items_per_page: u32) -> Result<Vec<Project>, AtlasError> {
        let page: Paginated<Project> = self
            .client
            .get_with_query(
                &atlas::projects(),
                &[
                    ("pageNum", page_num.to_string()),
                    ("itemsPerPage", items_per_page.to_string()),
                ],
            )
            .await?;
        Ok(page.results)
    }

    pub async fn delete(&self, project_id: &str) -> Result<(), AtlasError> {
        self.client.delete(&atlas::project(project_id)).await
    }
}
