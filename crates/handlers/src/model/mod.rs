//! # Resource Models
//!
//! Desired and observed state of each resource type, in the PascalCase shape
//! of the CloudFormation resource schemas.
//!
//! Every attribute is optional. Absent attributes are never sent to Atlas, so
//! a template only changes what it names.

mod api_keys;
pub mod cluster;
pub mod database_user;
pub mod encryption_at_rest;
pub mod network_container;
pub mod network_peering;
pub mod project;
pub mod project_ip_access_list;

pub use api_keys::ApiKeys;
pub use cluster::ClusterModel;
pub use database_user::DatabaseUserModel;
pub use encryption_at_rest::EncryptionAtRestModel;
pub use network_container::NetworkContainerModel;
pub use network_peering::NetworkPeeringModel;
pub use project::ProjectModel;
pub use project_ip_access_list::ProjectIpAccessListModel;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HandlerError;
use crate::identifier::ResourceKind;

/// Behaviour shared by every resource model
pub trait ResourceModel:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Default + Send + Sync + 'static
{
    const KIND: ResourceKind;

    /// Schema property holding the primary identifier
    const IDENTIFIER_PROPERTY: &'static str;

    /// Stable identifier, set on the first successful Create
    fn primary_identifier(&self) -> Option<&str>;

    fn api_keys(&self) -> Option<&ApiKeys>;
}

/// A required, non-empty string property
pub(crate) fn required<'a>(value: &'a Option<String>, property: &str) -> Result<&'a str, HandlerError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HandlerError::missing(property))
}

/// Treat empty strings from Atlas as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
