//! # AWS Systems Manager Parameter Store
//!
//! [`ParameterStore`] backed by the official AWS SDK. A new client is built
//! for every invocation from the caller's session credentials.

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;
use aws_sdk_ssm::Client as SsmClient;

use super::auth::{create_sdk_config, CallerCredentials};
use super::{ParameterStore, VaultError};

#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: SsmClient,
}

impl SsmParameterStore {
    pub async fn new(
        region: &str,
        credentials: Option<&CallerCredentials>,
        endpoint_url: Option<&str>,
    ) -> Self {
        let sdk_config = create_sdk_config(region, credentials, endpoint_url).await;
        Self {
            client: SsmClient::new(&sdk_config),
        }
    }
}

fn store_error(name: &str, error: impl std::error::Error) -> VaultError {
    VaultError::Store {
        name: name.to_string(),
        message: DisplayErrorContext(error).to_string(),
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn put_secure(&self, name: &str, value: &str) -> Result<(), VaultError> {
        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::SecureString)
            .overwrite(true)
            .send()
            .await
            .map_err(|e| store_error(name, e))?;
        Ok(())
    }

    async fn get_decrypted(&self, name: &str) -> Result<String, VaultError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|se| se.is_parameter_not_found())
                {
                    VaultError::NotFound {
                        name: name.to_string(),
                    }
                } else {
                    store_error(name, e)
                }
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(ToString::to_string)
            .ok_or_else(|| VaultError::EmptyValue {
                name: name.to_string(),
            })
    }

    async fn delete(&self, name: &str) -> Result<(), VaultError> {
        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(|se| se.is_parameter_not_found())
                {
                    VaultError::NotFound {
                        name: name.to_string(),
                    }
                } else {
                    store_error(name, e)
                }
            })?;
        Ok(())
    }
}
