//! # Handler Events
//!
//! The request shape of the CloudFormation resource provider protocol, reduced
//! to the fields the handlers read.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::protocol::CallbackContext;
use crate::vault::CallerCredentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::List,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::List => "LIST",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown action `{s}`"))
    }
}

/// One handler invocation as sent by CloudFormation
///
/// `action` and `resource_type` stay plain strings so unknown values can be
/// answered with a `FAILED` event instead of a decoding error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerEvent {
    #[serde(default)]
    pub action: String,
    #[serde(default, rename = "resourceType", alias = "typeName")]
    pub resource_type: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub callback_context: Option<CallbackContext>,
    #[serde(default)]
    pub request_data: RequestData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    #[serde(default)]
    pub resource_properties: Option<Value>,
    #[serde(default)]
    pub previous_resource_properties: Option<Value>,
    #[serde(default)]
    pub caller_credentials: Option<CallerCredentials>,
}
