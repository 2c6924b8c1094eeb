//! # Clusters
//!
//! `/groups/{groupId}/clusters` (legacy cluster API).

use std::collections::BTreeMap;

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AutoScaling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi_connector: Option<BiConnector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    #[serde(rename = "diskSizeGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_at_rest_provider: Option<String>,
    #[serde(rename = "mongoDBMajorVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongo_db_major_version: Option<String>,
    #[serde(rename = "mongoDBVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongo_db_version: Option<String>,
    #[serde(rename = "mongoURI", default, skip_serializing_if = "Option::is_none")]
    pub mongo_uri: Option<String>,
    #[serde(rename = "mongoURIUpdated", default, skip_serializing_if = "Option::is_none")]
    pub mongo_uri_updated: Option<String>,
    #[serde(rename = "mongoURIWithOptions", default, skip_serializing_if = "Option::is_none")]
    pub mongo_uri_with_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_backup_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_settings: Option<ProviderSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_specs: Option<Vec<ReplicationSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_strings: Option<ConnectionStrings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScaling {
    #[serde(rename = "diskGBEnabled", default, skip_serializing_if = "Option::is_none")]
    pub disk_gb_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeAutoScaling>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_down_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiConnector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_preference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_size_name: Option<String>,
    #[serde(rename = "diskIOPS", default, skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    #[serde(rename = "encryptEBSVolume", default, skip_serializing_if = "Option::is_none")]
    pub encrypt_ebs_volume: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<ProviderAutoScaling>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<ProviderComputeAutoScaling>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderComputeAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_instance_size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    /// Keyed by region name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regions_config: BTreeMap<String, RegionsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electable_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_nodes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStrings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_srv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_srv: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Clusters<'a> {
    client: &'a AtlasClient,
}

impl<'a> Clusters<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, group_id: &str, cluster: &Cluster) -> Result<Cluster, AtlasError> {
        self.client.post(&atlas::clusters(group_id), cluster).await
    }

    pub async fn get(&self, group_id: &str, cluster_name: &str) -> Result<Cluster, AtlasError> {
        self.client.get(&atlas::cluster(group_id, cluster_name)).await
    }

    pub async fn update(
        &self,
        group_id: &str,
        cluster_name: &str,
        cluster: &Cluster,
    ) -> Result<Cluster, AtlasError> {
        self.client
            .patch(&atlas::cluster(group_id, cluster_name), cluster)
            .await
    }

    pub async fn delete(&self, group_id: &str, cluster_name: &str) -> Result<(), AtlasError> {
        self.client
            .delete(&atlas::cluster(group_id, cluster_name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_not_sent() {
        let cluster = Cluster {
            name: Some("C1".to_string()),
            mongo_db_major_version: Some("5.0".to_string()),
            disk_size_gb: Some(10.0),
            ..Cluster::default()
        };
        assert_eq!(
            serde_json::to_value(&cluster).unwrap(),
            json!({"name": "C1", "mongoDBMajorVersion": "5.0", "diskSizeGB": 10.0})
        );
    }

    #[test]
    fn test_decodes_atlas_document() {
        let cluster: Cluster = serde_json::from_value(json!({
            "id": "5e2211c17a3e5a48f5497de3",
            "name": "C1",
            "stateName": "IDLE",
            "mongoURI": "mongodb://c1-shard-00-00.mongodb.net:27017",
            "connectionStrings": {"standard": "mongodb://c1", "standardSrv": "mongodb+srv://c1"},
            "providerSettings": {"providerName": "AWS", "regionName": "US_EAST_1", "encryptEBSVolume": true},
            "replicationSpecs": [{
                "id": "r1",
                "numShards": 1,
                "zoneName": "Zone 1",
                "regionsConfig": {"US_EAST_1": {"electableNodes": 3, "priority": 7, "readOnlyNodes": 0}}
            }],
            "links": []
        }))
        .unwrap();
        assert_eq!(cluster.state_name.as_deref(), Some("IDLE"));
        assert_eq!(
            cluster.provider_settings.and_then(|p| p.encrypt_ebs_volume),
            Some(true)
        );
        let specs = cluster.replication_specs.unwrap();
        assert_eq!(specs[0].regions_config["US_EAST_1"].electable_nodes, Some(3));
    }
}
