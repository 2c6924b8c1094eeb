//! MongoDB Atlas CloudFormation Resource Handlers
//!
//! This library provides the reconciliation protocol, the credential vault
//! adapter, and the Atlas API client used by the `MongoDB::StpAtlasV1::*`
//! resource types. Tests are included in the module files and under `tests/`.

pub mod atlas;
pub mod config;
pub mod constants;
pub mod error;
pub mod identifier;
pub mod model;
pub mod protocol;
pub mod resources;
pub mod runtime;
pub mod vault;

// Re-export the handler surface for convenience
pub use config::HandlerConfig;
pub use error::HandlerError;
pub use identifier::ResourceKind;
pub use protocol::{
    CallbackContext, ContinuationToken, HandlerErrorCode, OperationStatus, ProgressEvent,
};
pub use resources::{HandlerRequest, ResourceHandler};
