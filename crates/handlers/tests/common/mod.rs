//! Shared fixtures for the handler integration tests
//!
//! - `MemoryParameterStore`: in-memory stand-in for Parameter Store
//! - `request`: a [`HandlerRequest`] wired to a wiremock Atlas server

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use handlers::protocol::ContinuationToken;
use handlers::vault::{ParameterStore, VaultError};
use handlers::{HandlerConfig, HandlerRequest};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_ROOT: &str = "/api/atlas/v1.0";

/// Parameter Store double; deletes of unknown names fail like SSM's `ParameterNotFound`
#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    parameters: Mutex<HashMap<String, String>>,
    fail_deletes: AtomicBool,
}

impl MemoryParameterStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every delete fails with a store error, even for existing names
    pub fn failing_deletes() -> Arc<Self> {
        let store = Self::default();
        store.fail_deletes.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn seed(&self, name: &str, value: &Value) {
        self.parameters
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    /// Stored value decoded as JSON
    pub fn value(&self, name: &str) -> Option<Value> {
        self.parameters
            .lock()
            .unwrap()
            .get(name)
            .map(|raw| serde_json::from_str(raw).unwrap())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.lock().unwrap().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parameters.lock().unwrap().len()
    }
}

#[async_trait]
impl ParameterStore for MemoryParameterStore {
    async fn put_secure(&self, name: &str, value: &str) -> Result<(), VaultError> {
        self.parameters
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn get_decrypted(&self, name: &str) -> Result<String, VaultError> {
        self.parameters
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| VaultError::NotFound {
                name: name.to_string(),
            })
    }

    async fn delete(&self, name: &str) -> Result<(), VaultError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(VaultError::Store {
                name: name.to_string(),
                message: "AccessDeniedException".to_string(),
            });
        }
        self.parameters
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| VaultError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Handler configuration pointing at the mock Atlas API
pub fn config(server: &MockServer) -> HandlerConfig {
    HandlerConfig::default().with_atlas_base_url(format!("{}{API_ROOT}", server.uri()))
}

/// A first invocation (empty callback context)
pub fn request(server: &MockServer, store: &Arc<MemoryParameterStore>) -> HandlerRequest {
    let store: Arc<dyn ParameterStore> = Arc::<MemoryParameterStore>::clone(store);
    HandlerRequest::new(store, config(server))
}

/// A resumed invocation carrying `stateName`
pub fn resumed(
    server: &MockServer,
    store: &Arc<MemoryParameterStore>,
    state: &str,
) -> HandlerRequest {
    request(server, store).with_callback_context(ContinuationToken::polling(state).into_context())
}

/// Full Atlas path of an API route
pub fn api(route: &str) -> String {
    format!("{API_ROOT}{route}")
}

pub fn api_keys() -> Value {
    json!({"PublicKey": "pub", "PrivateKey": "priv"})
}

pub fn model<M: serde::de::DeserializeOwned>(value: Value) -> M {
    serde_json::from_value(value).unwrap()
}
