//! # Encryption at Rest
//!
//! `/groups/{groupId}/encryptionAtRest`. There is no DELETE: disabling the
//! customer key is a PATCH with `awsKms.enabled = false`.

use paths::atlas;
use serde::{Deserialize, Serialize};

use super::{AtlasClient, AtlasError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionAtRest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_kms: Option<AwsKms>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsKms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "accessKeyID", default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(rename = "customerMasterKeyID", default, skip_serializing_if = "Option::is_none")]
    pub customer_master_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl std::fmt::Debug for AwsKms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsKms")
            .field("enabled", &self.enabled)
            .field("access_key_id", &self.access_key_id)
            .field("customer_master_key_id", &self.customer_master_key_id)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EncryptionsAtRest<'a> {
    client: &'a AtlasClient,
}

impl<'a> EncryptionsAtRest<'a> {
    pub(super) fn new(client: &'a AtlasClient) -> Self {
        Self { client }
    }

    /// Apply a configuration (create and update are the same call)
    pub async fn apply(
        &self,
        group_id: &str,
        configuration: &EncryptionAtRest,
    ) -> Result<EncryptionAtRest, AtlasError> {
        self.client
            .patch(&atlas::encryption_at_rest(group_id), configuration)
            .await
    }

    pub async fn get(&self, group_id: &str) -> Result<EncryptionAtRest, AtlasError> {
        self.client.get(&atlas::encryption_at_rest(group_id)).await
    }

    pub async fn disable(&self, group_id: &str) -> Result<(), AtlasError> {
        let disabled = EncryptionAtRest {
            aws_kms: Some(AwsKms {
                enabled: Some(false),
                ..AwsKms::default()
            }),
        };
        let _: EncryptionAtRest = self.apply(group_id, &disabled).await?;
        Ok(())
    }
}
