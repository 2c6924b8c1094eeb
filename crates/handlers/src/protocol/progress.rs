//! # Progress Events
//!
//! The result shape of every handler invocation, in the wire form of the
//! CloudFormation plugin protocol.

use serde::{Deserialize, Serialize};

use super::continuation::{CallbackContext, ContinuationToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    InProgress,
    Success,
    Failed,
}

/// CloudFormation handler error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    InvalidRequest,
    NotFound,
    InvalidCredentials,
    AccessDenied,
    GeneralServiceException,
    NotStabilized,
    InternalFailure,
}

impl HandlerErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerErrorCode::InvalidRequest => "InvalidRequest",
            HandlerErrorCode::NotFound => "NotFound",
            HandlerErrorCode::InvalidCredentials => "InvalidCredentials",
            HandlerErrorCode::AccessDenied => "AccessDenied",
            HandlerErrorCode::GeneralServiceException => "GeneralServiceException",
            HandlerErrorCode::NotStabilized => "NotStabilized",
            HandlerErrorCode::InternalFailure => "InternalFailure",
        }
    }
}

/// Result of one handler invocation
///
/// `callback_context` is returned verbatim by the outer reconciler on the next
/// invocation. It is non-empty exactly when `status` is `IN_PROGRESS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "CallbackContext::is_empty")]
    pub callback_context: CallbackContext,
}

impl<M> ProgressEvent<M> {
    /// Terminal success carrying the reconciled model
    pub fn success(message: impl Into<String>, model: M) -> Self {
        Self {
            status: OperationStatus::Success,
            error_code: None,
            message: message.into(),
            resource_model: Some(model),
            resource_models: None,
            callback_delay_seconds: None,
            callback_context: CallbackContext::default(),
        }
    }

    /// Ask to be re-invoked after `delay_secs` with `token` in the callback context
    pub fn in_progress(
        message: impl Into<String>,
        model: M,
        delay_secs: u32,
        token: ContinuationToken,
    ) -> Self {
        Self {
            status: OperationStatus::InProgress,
            error_code: None,
            message: message.into(),
            resource_model: Some(model),
            resource_models: None,
            callback_delay_seconds: Some(delay_secs),
            callback_context: token.into_context(),
        }
    }

    /// Terminal failure
    pub fn failed(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Failed,
            error_code: Some(error_code),
            message: message.into(),
            resource_model: None,
            resource_models: None,
            callback_delay_seconds: None,
            callback_context: CallbackContext::default(),
        }
    }

    /// Terminal success of a List invocation
    pub fn listed(message: impl Into<String>, models: Vec<M>) -> Self {
        Self {
            status: OperationStatus::Success,
            error_code: None,
            message: message.into(),
            resource_model: None,
            resource_models: Some(models),
            callback_delay_seconds: None,
            callback_context: CallbackContext::default(),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == OperationStatus::InProgress
    }

    /// The continuation token the next invocation will receive
    pub fn continuation(&self) -> ContinuationToken {
        ContinuationToken::from(&self.callback_context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_progress_wire_shape() {
        let event = ProgressEvent::in_progress(
            "Create Cluster `CREATING`",
            json!({"Name": "C1"}),
            65,
            ContinuationToken::polling("CREATING"),
        );
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["status"], "IN_PROGRESS");
        assert_eq!(wire["callbackDelaySeconds"], 65);
        assert_eq!(wire["callbackContext"], json!({"stateName": "CREATING"}));
        assert_eq!(wire["resourceModel"]["Name"], "C1");
        assert!(wire.get("errorCode").is_none());
    }

    #[test]
    fn test_failed_wire_shape() {
        let event: ProgressEvent<serde_json::Value> =
            ProgressEvent::failed(HandlerErrorCode::GeneralServiceException, "boom");
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["status"], "FAILED");
        assert_eq!(wire["errorCode"], "GeneralServiceException");
        assert_eq!(wire["message"], "boom");
        assert!(wire.get("callbackContext").is_none());
        assert!(wire.get("resourceModel").is_none());
    }

    #[test]
    fn test_terminal_events_carry_no_continuation() {
        let event = ProgressEvent::success("Complete", ());
        assert_eq!(event.continuation(), ContinuationToken::Fresh);
        assert!(!event.is_in_progress());
    }

    #[test]
    fn test_listed_carries_models() {
        let event = ProgressEvent::listed("List Complete", vec![1, 2]);
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["resourceModels"], json!([1, 2]));
        assert_eq!(wire["status"], "SUCCESS");
    }
}
