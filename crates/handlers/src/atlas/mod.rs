//! # Atlas Client
//!
//! Digest-authenticated client for the MongoDB Atlas Public API (v1.0).
//!
//! One client is built per invocation from a `(public key, private key)` pair.
//! Each request is sent once without credentials; when Atlas answers `401` with
//! a Digest challenge the request is replayed with an `Authorization` header.
//! Per-resource operations live in subclients:
//!
//! - `clusters`, `database_users`, `projects`
//! - `containers`, `peers`, `access_list`
//! - `encryption_at_rest`

mod access_list;
mod clusters;
mod containers;
mod database_users;
mod digest;
mod encryption_at_rest;
mod error;
mod peers;
mod projects;

pub use access_list::{AccessList, AccessListEntry};
pub use clusters::{
    AutoScaling, BiConnector, Cluster, Clusters, ComputeAutoScaling, ConnectionStrings,
    ProviderAutoScaling, ProviderComputeAutoScaling, ProviderSettings, RegionsConfig,
    ReplicationSpec,
};
pub use containers::{Container, Containers};
pub use database_users::{DatabaseUser, DatabaseUsers, Label, Role, Scope};
pub use digest::DigestChallenge;
pub use encryption_at_rest::{AwsKms, EncryptionAtRest, EncryptionsAtRest};
pub use error::{ApiErrorBody, AtlasError};
pub use peers::{Peer, Peers};
pub use projects::{Project, Projects};

use paths::ApiPath;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Client as ReqwestClient, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::HandlerConfig;
use crate::constants::USER_AGENT;

/// Paginated list envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct DigestCredentials {
    public_key: String,
    private_key: String,
}

/// Atlas API client
#[derive(Clone)]
pub struct AtlasClient {
    http: ReqwestClient,
    base_url: Url,
    credentials: DigestCredentials,
}

impl std::fmt::Debug for AtlasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasClient")
            .field("base_url", &self.base_url.as_str())
            .field("public_key", &self.credentials.public_key)
            .finish_non_exhaustive()
    }
}

impl AtlasClient {
    /// Create a client from an API key pair
    ///
    /// # Errors
    ///
    /// Fails when either key is empty, the base URL cannot be parsed, or the
    /// HTTP client cannot be built.
    pub fn new(public_key: &str, private_key: &str, config: &HandlerConfig) -> Result<Self, AtlasError> {
        if public_key.trim().is_empty() || private_key.trim().is_empty() {
            return Err(AtlasError::MissingCredentials);
        }

        let base_url = Url::parse(&config.atlas_base_url).map_err(|e| AtlasError::InvalidBaseUrl {
            url: config.atlas_base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AtlasError::InvalidBaseUrl {
                url: config.atlas_base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let http = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url,
            credentials: DigestCredentials {
                public_key: public_key.to_string(),
                private_key: private_key.to_string(),
            },
        })
    }

    pub fn clusters(&self) -> Clusters<'_> {
        Clusters::new(self)
    }

    pub fn database_users(&self) -> DatabaseUsers<'_> {
        DatabaseUsers::new(self)
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn containers(&self) -> Containers<'_> {
        Containers::new(self)
    }

    pub fn peers(&self) -> Peers<'_> {
        Peers::new(self)
    }

    pub fn access_list(&self) -> AccessList<'_> {
        AccessList::new(self)
    }

    pub fn encryption_at_rest(&self) -> EncryptionsAtRest<'_> {
        EncryptionsAtRest::new(self)
    }

    /// Absolute URL of `path`, each segment percent-encoded once
    fn url(&self, path: &ApiPath, query: &[(&str, String)]) -> Result<Url, AtlasError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AtlasError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(path.segments());
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&[u8]>,
        authorization: Option<HeaderValue>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }
        if let Some(authorization) = authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        builder
    }

    /// Send a request, answering a Digest challenge when Atlas issues one
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, AtlasError> {
        debug!("Atlas {} {}", method, url.path());
        let response = self
            .request(method.clone(), url.clone(), body.as_deref(), None)
            .send()
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(header) = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(response);
        };
        let challenge = DigestChallenge::parse(header)?;

        let mut uri = url.path().to_string();
        if let Some(query) = url.query() {
            uri.push('?');
            uri.push_str(query);
        }
        let cnonce = uuid::Uuid::new_v4().simple().to_string();
        let authorization = challenge.authorization(
            &self.credentials.public_key,
            &self.credentials.private_key,
            method.as_str(),
            &uri,
            &cnonce,
            1,
        );
        let authorization = HeaderValue::from_str(&authorization)
            .map_err(|e| AtlasError::Challenge(e.to_string()))?;

        Ok(self
            .request(method, url, body.as_deref(), Some(authorization))
            .send()
            .await?)
    }

    /// Turn non-2xx responses into [`AtlasError::Api`]
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, AtlasError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ApiErrorBody>(&text).unwrap_or_else(|_| ApiErrorBody {
            detail: (!text.is_empty()).then_some(text),
            error: Some(status.as_u16()),
            ..ApiErrorBody::default()
        });
        if status != StatusCode::NOT_FOUND {
            warn!("Atlas returned HTTP {}: {}", status.as_u16(), body);
        }
        Err(AtlasError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &ApiPath,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<T, AtlasError> {
        let url = self.url(path, query)?;
        let response = Self::check(self.execute(method, url, body).await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(AtlasError::Decode)
    }

    fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>, AtlasError> {
        serde_json::to_vec(body).map_err(AtlasError::Encode)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &ApiPath) -> Result<T, AtlasError> {
        self.send_json(Method::GET, path, &[], None).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        query: &[(&str, String)],
    ) -> Result<T, AtlasError> {
        self.send_json(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: &B,
    ) -> Result<T, AtlasError> {
        self.send_json(Method::POST, path, &[], Some(Self::encode(body)?))
            .await
    }

    pub(crate) async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: &B,
    ) -> Result<T, AtlasError> {
        self.send_json(Method::PATCH, path, &[], Some(Self::encode(body)?))
            .await
    }

    /// DELETE; any 2xx is success and the body is ignored
    pub(crate) async fn delete(&self, path: &ApiPath) -> Result<(), AtlasError> {
        let url = self.url(path, &[])?;
        Self::check(self.execute(Method::DELETE, url, None).await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HandlerConfig {
        HandlerConfig::default().with_atlas_base_url("http://127.0.0.1:1/api/atlas/v1.0")
    }

    #[test]
    fn test_missing_keys_are_rejected() {
        assert!(matches!(
            AtlasClient::new("", "private", &config()),
            Err(AtlasError::MissingCredentials)
        ));
        assert!(matches!(
            AtlasClient::new("public", "  ", &config()),
            Err(AtlasError::MissingCredentials)
        ));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = HandlerConfig::default().with_atlas_base_url("not a url");
        assert!(matches!(
            AtlasClient::new("public", "private", &config),
            Err(AtlasError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_url_encodes_segments_once() {
        let client = AtlasClient::new("public", "private", &config()).unwrap();
        let url = client
            .url(&paths::atlas::access_list_entry("P1", "10.0.0.0/16"), &[])
            .unwrap();
        assert_eq!(url.path(), "/api/atlas/v1.0/groups/P1/accessList/10.0.0.0%2F16");

        let url = client
            .url(
                &paths::atlas::projects(),
                &[("itemsPerPage", "100".to_string())],
            )
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1/api/atlas/v1.0/groups?itemsPerPage=100");
    }

    #[test]
    fn test_unencodable_body_is_an_encode_error() {
        // JSON object keys must be strings
        let body = std::collections::BTreeMap::from([(vec![1_u8], "value")]);
        let err = AtlasClient::encode(&body).unwrap_err();
        assert!(matches!(err, AtlasError::Encode(_)));
        assert!(err.to_string().starts_with("failed to encode Atlas request"));
    }

    #[test]
    fn test_debug_hides_private_key() {
        let client = AtlasClient::new("public", "super-private", &config()).unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("public"));
        assert!(!rendered.contains("super-private"));
    }
}
