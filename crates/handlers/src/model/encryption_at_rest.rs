//! # Encryption at Rest Model
//!
//! Customer-managed AWS KMS key for a project. The primary identifier is
//! derived from the project id, since there is one configuration per project.

use serde::{Deserialize, Serialize};

use crate::atlas;
use crate::identifier::ResourceKind;

use super::{non_empty, ApiKeys, ResourceModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptionAtRestModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_kms: Option<AwsKmsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfn_primary_identifier: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsKmsConfig {
    #[serde(rename = "AccessKeyID", default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(rename = "CustomerMasterKeyID", default, skip_serializing_if = "Option::is_none")]
    pub customer_master_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
}

impl std::fmt::Debug for AwsKmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsKmsConfig")
            .field("access_key_id", &self.access_key_id)
            .field("customer_master_key_id", &self.customer_master_key_id)
            .field("enabled", &self.enabled)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl ResourceModel for EncryptionAtRestModel {
    const KIND: ResourceKind = ResourceKind::EncryptionAtRest;
    const IDENTIFIER_PROPERTY: &'static str = "CfnPrimaryIdentifier";

    fn primary_identifier(&self) -> Option<&str> {
        self.cfn_primary_identifier.as_deref()
    }

    fn api_keys(&self) -> Option<&ApiKeys> {
        self.api_keys.as_ref()
    }
}

impl EncryptionAtRestModel {
    pub fn to_request(&self) -> atlas::EncryptionAtRest {
        atlas::EncryptionAtRest {
            aws_kms: self.aws_kms.as_ref().map(|kms| atlas::AwsKms {
                enabled: kms.enabled,
                access_key_id: kms.access_key_id.clone(),
                secret_access_key: kms.secret_access_key.clone(),
                customer_master_key_id: kms.customer_master_key_id.clone(),
                region: kms.region.clone(),
            }),
        }
    }

    /// Reflect the observed key configuration; Atlas never echoes the secret
    pub fn apply_remote(&mut self, remote: atlas::EncryptionAtRest) {
        let Some(kms) = remote.aws_kms else {
            return;
        };
        let secret_access_key = self
            .aws_kms
            .as_mut()
            .and_then(|current| current.secret_access_key.take());
        self.aws_kms = Some(AwsKmsConfig {
            access_key_id: non_empty(kms.access_key_id),
            customer_master_key_id: non_empty(kms.customer_master_key_id),
            enabled: kms.enabled,
            region: non_empty(kms.region),
            secret_access_key,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_kms_wire_names() {
        let model: EncryptionAtRestModel = serde_json::from_value(json!({
            "ProjectId": "P1",
            "AwsKms": {
                "AccessKeyID": "AKIA",
                "SecretAccessKey": "secret",
                "CustomerMasterKeyID": "key-1",
                "Enabled": true,
                "Region": "US_EAST_1"
            }
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(model.to_request()).unwrap(),
            json!({"awsKms": {
                "enabled": true,
                "accessKeyID": "AKIA",
                "secretAccessKey": "secret",
                "customerMasterKeyID": "key-1",
                "region": "US_EAST_1"
            }})
        );
    }

    #[test]
    fn test_apply_remote_keeps_secret() {
        let mut model = EncryptionAtRestModel {
            aws_kms: Some(AwsKmsConfig {
                secret_access_key: Some("secret".to_string()),
                ..AwsKmsConfig::default()
            }),
            ..EncryptionAtRestModel::default()
        };
        model.apply_remote(atlas::EncryptionAtRest {
            aws_kms: Some(atlas::AwsKms {
                enabled: Some(true),
                customer_master_key_id: Some("key-1".to_string()),
                ..atlas::AwsKms::default()
            }),
        });
        let kms = model.aws_kms.unwrap();
        assert_eq!(kms.enabled, Some(true));
        assert_eq!(kms.customer_master_key_id.as_deref(), Some("key-1"));
        assert_eq!(kms.secret_access_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let kms = AwsKmsConfig {
            secret_access_key: Some("very-secret".to_string()),
            ..AwsKmsConfig::default()
        };
        assert!(!format!("{kms:?}").contains("very-secret"));
    }
}
