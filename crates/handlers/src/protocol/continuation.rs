//! # Continuation Token
//!
//! The callback context is an opaque string-keyed JSON map owned by the outer
//! reconciler. Handlers only ever read and write `stateName`; the two-state
//! machine it encodes is modeled as [`ContinuationToken`] and converted at the
//! edge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::STATE_NAME_KEY;

/// Opaque callback context threaded between invocations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackContext(Map<String, Value>);

impl CallbackContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

impl From<Map<String, Value>> for CallbackContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Where a multi-invocation operation stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuationToken {
    /// First invocation: start the provider operation
    Fresh,
    /// A provider operation was started; resume by polling
    PollingFor { state: String },
}

impl ContinuationToken {
    pub fn polling(state: impl Into<String>) -> Self {
        ContinuationToken::PollingFor {
            state: state.into(),
        }
    }

    pub fn is_polling(&self) -> bool {
        matches!(self, ContinuationToken::PollingFor { .. })
    }

    /// Last observed provider state, if polling
    pub fn state(&self) -> Option<&str> {
        match self {
            ContinuationToken::Fresh => None,
            ContinuationToken::PollingFor { state } => Some(state),
        }
    }

    pub fn into_context(self) -> CallbackContext {
        let mut context = CallbackContext::new();
        if let ContinuationToken::PollingFor { state } = self {
            context.insert(STATE_NAME_KEY, Value::String(state));
        }
        context
    }
}

impl From<&CallbackContext> for ContinuationToken {
    /// Presence of `stateName` alone decides polling; a non-string value is kept as its JSON text.
    fn from(context: &CallbackContext) -> Self {
        match context.get(STATE_NAME_KEY) {
            None => ContinuationToken::Fresh,
            Some(Value::String(state)) => ContinuationToken::polling(state.as_str()),
            Some(other) => ContinuationToken::polling(other.to_string()),
        }
    }
}
