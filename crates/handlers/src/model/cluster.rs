//! # Cluster Model
//!
//! `MongoDB::StpAtlasV1::Cluster`

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::error::HandlerError;
use crate::identifier::{format_major_version, ResourceKind};

use super::{non_empty, ApiKeys, ResourceModel};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
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
    #[serde(rename = "DiskSizeGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_at_rest_provider: Option<String>,
    #[serde(rename = "MongoDBMajorVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongo_db_major_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_backup_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_settings: Option<ProviderSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_specs: Option<Vec<ReplicationSpec>>,

    // Read-only attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "MongoDBVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongo_db_version: Option<String>,
    #[serde(rename = "MongoURI", default, skip_serializing_if = "Option::is_none")]
    pub mongo_uri: Option<String>,
    #[serde(rename = "MongoURIUpdated", default, skip_serializing_if = "Option::is_none")]
    pub mongo_uri_updated: Option<String>,
    #[serde(rename = "MongoURIWithOptions", default, skip_serializing_if = "Option::is_none")]
    pub mongo_uri_with_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_cfn_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScaling {
    #[serde(rename = "DiskGBEnabled", default, skip_serializing_if = "Option::is_none")]
    pub disk_gb_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<AutoScalingCompute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_down_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BiConnector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_preference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<ProviderAutoScaling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_provider_name: Option<String>,
    #[serde(rename = "DiskIOPS", default, skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    #[serde(rename = "EncryptEBSVolume", default, skip_serializing_if = "Option::is_none")]
    pub encrypt_ebs_volume: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_size_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<ProviderAutoScalingCompute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderAutoScalingCompute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_instance_size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicationSpec {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions_config: Vec<RegionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electable_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_nodes: Option<i64>,
}

impl ResourceModel for ClusterModel {
    const KIND: ResourceKind = ResourceKind::Cluster;
    const IDENTIFIER_PROPERTY: &'static str = "ClusterCfnIdentifier";

    fn primary_identifier(&self) -> Option<&str> {
        self.cluster_cfn_identifier.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl ClusterModel {
    /// Atlas derives the topology from `ReplicationSpecs`; a cluster type or
    /// shard count next to it is rejected before any provider call.
    pub fn validate(&self, operation: &str) -> Result<(), HandlerError> {
        if self.replication_specs.as_ref().is_none_or(Vec::is_empty) {
            return Ok(());
        }
        let conflicting: Vec<&str> = [
            ("ClusterType", self.cluster_type.is_some()),
            ("NumShards", self.num_shards.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect();

        if conflicting.is_empty() {
            Ok(())
        } else {
            Err(HandlerError::InvalidRequest(format!(
                "error {operation} cluster: {} must not be set when `ReplicationSpecs` is set",
                conflicting.join(" and ")
            )))
        }
    }

    pub fn to_request(&self) -> atlas::Cluster {
        atlas::Cluster {
            name: self.name.clone(),
            encryption_at_rest_provider: self.encryption_at_rest_provider.clone(),
            cluster_type: self.cluster_type.clone(),
            auto_scaling: self.auto_scaling.as_ref().map(|a| atlas::AutoScaling {
                disk_gb_enabled: a.disk_gb_enabled,
                compute: a.compute.as_ref().map(|c| atlas::ComputeAutoScaling {
                    enabled: c.enabled,
                    scale_down_enabled: c.scale_down_enabled,
                }),
            }),
            num_shards: self.num_shards,
            backup_enabled: self.backup_enabled,
            provider_backup_enabled: self.provider_backup_enabled,
            disk_size_gb: self.disk_size_gb,
            mongo_db_major_version: self
                .mongo_db_major_version
                .as_deref()
                .map(format_major_version),
            bi_connector: self.bi_connector.as_ref().map(|b| atlas::BiConnector {
                enabled: b.enabled,
                read_preference: b.read_preference.clone(),
            }),
            provider_settings: self.provider_settings.as_ref().map(ProviderSettings::to_request),
            replication_specs: self
                .replication_specs
                .as_ref()
                .map(|specs| specs.iter().map(ReplicationSpec::to_request).collect()),
            ..atlas::Cluster::default()
        }
    }

    /// Reflect the observed cluster into the model
    pub fn apply_remote(&mut self, remote: atlas::Cluster) {
        if let Some(auto_scaling) = remote.auto_scaling {
            let compute = auto_scaling.compute.unwrap_or_default();
            self.auto_scaling = Some(AutoScaling {
                disk_gb_enabled: auto_scaling.disk_gb_enabled,
                compute: Some(AutoScalingCompute {
                    enabled: compute.enabled,
                    scale_down_enabled: compute.scale_down_enabled,
                }),
            });
        }
        if let Some(bi_connector) = remote.bi_connector {
            self.bi_connector = Some(BiConnector {
                enabled: bi_connector.enabled,
                read_preference: non_empty(bi_connector.read_preference),
            });
        }
        if let Some(provider_settings) = remote.provider_settings {
            self.provider_settings = Some(ProviderSettings::from_remote(provider_settings));
        }
        if let Some(specs) = remote.replication_specs {
            self.replication_specs = Some(specs.into_iter().map(ReplicationSpec::from_remote).collect());
        }

        self.backup_enabled = remote.backup_enabled;
        self.provider_backup_enabled = remote.provider_backup_enabled;
        self.cluster_type = non_empty(remote.cluster_type);
        self.disk_size_gb = remote.disk_size_gb;
        self.encryption_at_rest_provider = non_empty(remote.encryption_at_rest_provider);
        self.num_shards = remote.num_shards.or(self.num_shards);
        if let Some(major) = non_empty(remote.mongo_db_major_version) {
            self.mongo_db_major_version = Some(major);
        }
        self.mongo_db_version = non_empty(remote.mongo_db_version);
        self.mongo_uri = non_empty(remote.mongo_uri);
        self.mongo_uri_updated = non_empty(remote.mongo_uri_updated);
        self.mongo_uri_with_options = non_empty(remote.mongo_uri_with_options);
        self.paused = remote.paused;
        self.srv_address = non_empty(remote.srv_address);
        self.state_name = non_empty(remote.state_name);
        if let Some(connection_strings) = remote.connection_strings {
            self.connection_string = non_empty(connection_strings.standard);
            self.srv_connection_string = non_empty(connection_strings.standard_srv);
        }
        if let Some(id) = non_empty(remote.id) {
            self.id = Some(id);
        }
    }
}

impl ProviderSettings {
    fn to_request(&self) -> atlas::ProviderSettings {
        atlas::ProviderSettings {
            provider_name: self.provider_name.clone(),
            backing_provider_name: self.backing_provider_name.clone(),
            region_name: self.region_name.clone(),
            instance_size_name: self.instance_size_name.clone(),
            disk_iops: self.disk_iops,
            encrypt_ebs_volume: self.encrypt_ebs_volume,
            volume_type: self.volume_type.clone(),
            auto_scaling: self
                .auto_scaling
                .as_ref()
                .and_then(|a| a.compute.as_ref())
                .map(|c| atlas::ProviderAutoScaling {
                    compute: Some(atlas::ProviderComputeAutoScaling {
                        min_instance_size: c.min_instance_size.clone(),
                        max_instance_size: c.max_instance_size.clone(),
                    }),
                }),
        }
    }

    fn from_remote(remote: atlas::ProviderSettings) -> Self {
        Self {
            auto_scaling: remote
                .auto_scaling
                .and_then(|a| a.compute)
                .map(|c| ProviderAutoScaling {
                    compute: Some(ProviderAutoScalingCompute {
                        min_instance_size: non_empty(c.min_instance_size),
                        max_instance_size: non_empty(c.max_instance_size),
                    }),
                }),
            backing_provider_name: non_empty(remote.backing_provider_name),
            disk_iops: remote.disk_iops,
            encrypt_ebs_volume: remote.encrypt_ebs_volume,
            instance_size_name: non_empty(remote.instance_size_name),
            provider_name: non_empty(remote.provider_name),
            region_name: non_empty(remote.region_name),
            volume_type: non_empty(remote.volume_type),
        }
    }
}

impl ReplicationSpec {
    fn to_request(&self) -> atlas::ReplicationSpec {
        atlas::ReplicationSpec {
            id: self.id.clone(),
            num_shards: self.num_shards,
            zone_name: self.zone_name.clone(),
            regions_config: self
                .regions_config
                .iter()
                .filter_map(|region| {
                    let name = region.region_name.clone()?;
                    Some((
                        name,
                        atlas::RegionsConfig {
                            analytics_nodes: region.analytics_nodes,
                            electable_nodes: region.electable_nodes,
                            priority: region.priority,
                            read_only_nodes: region.read_only_nodes,
                        },
                    ))
                })
                .collect(),
        }
    }

    fn from_remote(remote: atlas::ReplicationSpec) -> Self {
        Self {
            id: non_empty(remote.id),
            num_shards: remote.num_shards,
            zone_name: non_empty(remote.zone_name),
            regions_config: remote
                .regions_config
                .into_iter()
                .map(|(region_name, config)| RegionConfig {
                    region_name: Some(region_name),
                    analytics_nodes: config.analytics_nodes,
                    electable_nodes: config.electable_nodes,
                    priority: config.priority,
                    read_only_nodes: config.read_only_nodes,
                })
                .collect(),
        }
    }
}
