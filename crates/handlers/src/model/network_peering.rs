//! # Network Peering Model
//!
//! An AWS VPC peering connection between an Atlas network container and a
//! customer VPC. The peering is asynchronous: Atlas reports `statusName`
//! until the connection settles, and `errorStateName` when AWS refuses it.

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::constants::DEFAULT_PROVIDER_NAME;
use crate::error::HandlerError;
use crate::identifier::ResourceKind;

use super::{non_empty, required, ApiKeys, ResourceModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkPeeringModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepter_region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_table_cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    // Read-only attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_state_name: Option<String>,
}

impl ResourceModel for NetworkPeeringModel {
    const KIND: ResourceKind = ResourceKind::NetworkPeering;
    const IDENTIFIER_PROPERTY: &'static str = "Id";

    fn primary_identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl NetworkPeeringModel {
    /// Create body; every AWS-side attribute is required
    pub fn to_create_request(&self) -> Result<atlas::Peer, HandlerError> {
        let container_id = required(&self.container_id, "ContainerId")?;
        let accepter_region_name = required(&self.accepter_region_name, "AccepterRegionName")?;
        let aws_account_id = required(&self.aws_account_id, "AwsAccountId")?;
        let route_table_cidr_block = required(&self.route_table_cidr_block, "RouteTableCidrBlock")?;
        let vpc_id = required(&self.vpc_id, "VpcId")?;

        Ok(atlas::Peer {
            container_id: Some(container_id.to_string()),
            accepter_region_name: Some(accepter_region_name.to_string()),
            aws_account_id: Some(aws_account_id.to_string()),
            route_table_cidr_block: Some(route_table_cidr_block.to_string()),
            vpc_id: Some(vpc_id.to_string()),
            provider_name: Some(self.provider_name_or_default()),
            ..atlas::Peer::default()
        })
    }

    /// Update body with whichever attributes are present
    pub fn to_update_request(&self) -> atlas::Peer {
        atlas::Peer {
            container_id: non_empty(self.container_id.clone()),
            accepter_region_name: non_empty(self.accepter_region_name.clone()),
            aws_account_id: non_empty(self.aws_account_id.clone()),
            route_table_cidr_block: non_empty(self.route_table_cidr_block.clone()),
            vpc_id: non_empty(self.vpc_id.clone()),
            provider_name: Some(self.provider_name_or_default()),
            ..atlas::Peer::default()
        }
    }

    fn provider_name_or_default(&self) -> String {
        non_empty(self.provider_name.clone()).unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string())
    }

    pub fn apply_remote(&mut self, remote: atlas::Peer) {
        if let Some(id) = non_empty(remote.id) {
            self.id = Some(id);
        }
        if let Some(container_id) = non_empty(remote.container_id) {
            self.container_id = Some(container_id);
        }
        self.accepter_region_name = non_empty(remote.accepter_region_name);
        self.aws_account_id = non_empty(remote.aws_account_id);
        self.route_table_cidr_block = non_empty(remote.route_table_cidr_block);
        self.vpc_id = non_empty(remote.vpc_id);
        self.connection_id = non_empty(remote.connection_id);
        self.error_state_name = non_empty(remote.error_state_name);
        self.status_name = non_empty(remote.status_name);
        self.provider_name = non_empty(remote.provider_name).or_else(|| self.provider_name.take());
    }

    /// A listed peering, scoped to `project_id`
    pub fn from_remote(project_id: &str, remote: atlas::Peer) -> Self {
        let mut model = Self {
            project_id: Some(project_id.to_string()),
            ..Self::default()
        };
        model.apply_remote(remote);
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> NetworkPeeringModel {
        NetworkPeeringModel {
            project_id: Some("P1".to_string()),
            container_id: Some("ctr-1".to_string()),
            accepter_region_name: Some("us-east-1".to_string()),
            aws_account_id: Some("123456789012".to_string()),
            route_table_cidr_block: Some("10.0.0.0/16".to_string()),
            vpc_id: Some("vpc-abc".to_string()),
            ..NetworkPeeringModel::default()
        }
    }

    #[test]
    fn test_create_request_defaults_provider() {
        let body = serde_json::to_value(complete().to_create_request().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "containerId": "ctr-1",
                "accepterRegionName": "us-east-1",
                "awsAccountId": "123456789012",
                "routeTableCidrBlock": "10.0.0.0/16",
                "vpcId": "vpc-abc",
                "providerName": "AWS"
            })
        );
    }

    #[test]
    fn test_create_request_rejects_empty_attributes() {
        let mut model = complete();
        model.route_table_cidr_block = Some(String::new());
        let err = model.to_create_request().unwrap_err();
        assert_eq!(err.to_string(), "required property `RouteTableCidrBlock` is missing");

        let mut model = complete();
        model.vpc_id = None;
        assert!(model.to_create_request().is_err());
    }

    #[test]
    fn test_update_request_only_present_fields() {
        let model = NetworkPeeringModel {
            vpc_id: Some("vpc-new".to_string()),
            ..NetworkPeeringModel::default()
        };
        assert_eq!(
            serde_json::to_value(model.to_update_request()).unwrap(),
            json!({"vpcId": "vpc-new", "providerName": "AWS"})
        );
    }

    #[test]
    fn test_from_remote_reflects_status() {
        let remote: atlas::Peer = serde_json::from_value(json!({
            "id": "peer-1",
            "containerId": "ctr-1",
            "connectionId": "pcx-1",
            "statusName": "PENDING_ACCEPTANCE",
            "errorStateName": ""
        }))
        .unwrap();
        let model = NetworkPeeringModel::from_remote("P1", remote);
        assert_eq!(model.primary_identifier(), Some("peer-1"));
        assert_eq!(model.connection_id.as_deref(), Some("pcx-1"));
        assert_eq!(model.status_name.as_deref(), Some("PENDING_ACCEPTANCE"));
        assert_eq!(model.error_state_name, None);
        assert_eq!(model.project_id.as_deref(), Some("P1"));
    }
}
