//! # Constants
//!
//! Default values and protocol constants shared by every resource handler.

/// Default Atlas Public API root (v1.0)
pub const DEFAULT_ATLAS_BASE_URL: &str = "https://cloud.mongodb.com/api/atlas/v1.0";

/// Default per-request timeout against the Atlas API (seconds)
pub const DEFAULT_ATLAS_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Region used for the Parameter Store client when the request carries none
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// User agent sent with every Atlas request
pub const USER_AGENT: &str = concat!(
    "mongodbatlas-cloudformation-resources/",
    env!("CARGO_PKG_VERSION")
);

/// CallbackContext key carrying the last observed provider state
pub const STATE_NAME_KEY: &str = "stateName";

/// Callback delay after a cluster operation is initiated (seconds)
pub const CLUSTER_INITIATION_DELAY_SECS: u32 = 65;

/// Callback delay between cluster state polls (seconds)
pub const CLUSTER_POLL_DELAY_SECS: u32 = 60;

/// Callback delay after a peering operation is initiated (seconds)
pub const PEERING_INITIATION_DELAY_SECS: u32 = 10;

/// Callback delay between peering state polls (seconds)
pub const PEERING_POLL_DELAY_SECS: u32 = 15;

/// Provider name assumed for containers and peerings when none is given
pub const DEFAULT_PROVIDER_NAME: &str = "AWS";

/// Page size for project listing (only the first page is returned)
pub const PROJECT_LIST_PAGE_SIZE: u32 = 100;

/// Cluster states
pub const STATE_IDLE: &str = "IDLE";
pub const STATE_DELETED: &str = "DELETED";
pub const STATE_DELETING: &str = "DELETING";

/// Peering states
pub const PEERING_STATE_PENDING_ACCEPTANCE: &str = "PENDING_ACCEPTANCE";
pub const PEERING_STATE_FINALIZING: &str = "FINALIZING";
pub const PEERING_STATE_AVAILABLE: &str = "AVAILABLE";

/// Peering error states that end an operation as failed
pub const PEERING_ERROR_STATES: [&str; 3] = ["REJECTED", "EXPIRED", "INVALID_ARGUMENT"];
