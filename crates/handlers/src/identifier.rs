//! # Identifier Builder
//!
//! Deterministic, kind-namespaced primary identifiers and Parameter Store keys.
//!
//! The Parameter Store key is always `"<kind-prefix>-<primary-identifier>"`. The
//! prefixes are coupled to the IAM policy granted to the handlers (see
//! [`ResourceKind::iam_policy`]); changing one orphans every stored credential
//! bundle of that kind.

use std::fmt;

/// The resource types served by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Cluster,
    DatabaseUser,
    EncryptionAtRest,
    NetworkContainer,
    NetworkPeering,
    Project,
    ProjectIpAccessList,
}

const TYPE_NAMESPACE: &str = "MongoDB::StpAtlasV1::";

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Cluster,
        ResourceKind::DatabaseUser,
        ResourceKind::EncryptionAtRest,
        ResourceKind::NetworkContainer,
        ResourceKind::NetworkPeering,
        ResourceKind::Project,
        ResourceKind::ProjectIpAccessList,
    ];

    /// Parameter Store prefix for this kind
    pub fn vault_prefix(self) -> &'static str {
        match self {
            ResourceKind::Cluster => "mongodbstpatlasv1cluster",
            ResourceKind::DatabaseUser => "mongodbstpatlasv1databaseuser",
            ResourceKind::EncryptionAtRest => "mongodbstpatlasv1encryptionatrest",
            ResourceKind::NetworkContainer => "mongodbstpatlasv1networkcontainer",
            ResourceKind::NetworkPeering => "mongodbstpatlasv1networkpeering",
            ResourceKind::Project => "mongodbstpatlasv1project",
            ResourceKind::ProjectIpAccessList => "mongodbstpatlasv1projectipaccesslist",
        }
    }

    /// Short type name, without the `MongoDB::StpAtlasV1::` namespace
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Cluster => "Cluster",
            ResourceKind::DatabaseUser => "DatabaseUser",
            ResourceKind::EncryptionAtRest => "EncryptionAtRest",
            ResourceKind::NetworkContainer => "NetworkContainer",
            ResourceKind::NetworkPeering => "NetworkPeering",
            ResourceKind::Project => "Project",
            ResourceKind::ProjectIpAccessList => "ProjectIpAccessList",
        }
    }

    /// Fully qualified CloudFormation type name
    pub fn type_name(self) -> String {
        format!("{TYPE_NAMESPACE}{}", self.as_str())
    }

    /// Resolve a kind from either the fully qualified type name or the short name
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        let short = type_name.strip_prefix(TYPE_NAMESPACE).unwrap_or(type_name);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(short))
    }

    /// Parameter Store key for a primary identifier of this kind
    pub fn parameter_name(self, primary_identifier: &str) -> String {
        format!("{}-{primary_identifier}", self.vault_prefix())
    }

    /// IAM policy document granting the handlers access to exactly their own parameters
    pub fn iam_policy(kinds: &[ResourceKind], region: &str, account_id: &str) -> serde_json::Value {
        let resources: Vec<String> = kinds
            .iter()
            .map(|kind| {
                format!(
                    "arn:aws:ssm:{region}:{account_id}:parameter/{}-*",
                    kind.vault_prefix()
                )
            })
            .collect();
        serde_json::json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Action": ["ssm:PutParameter", "ssm:GetParameter", "ssm:DeleteParameter"],
                "Resource": resources,
            }]
        })
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"<projectId>-<clusterName>"`
pub fn cluster_identifier(project_id: &str, cluster_name: &str) -> String {
    format!("{project_id}-{cluster_name}")
}

/// `"user-<sanitized-username>-<projectId>"`
pub fn database_user_identifier(project_id: &str, username: &str) -> String {
    format!("user-{}-{project_id}", sanitize_username(username))
}

/// `"<projectId>-encryptionatrest"`
pub fn encryption_at_rest_identifier(project_id: &str) -> String {
    format!("{project_id}-encryptionatrest")
}

/// Globally unique identifier for an access list (Atlas assigns none)
pub fn access_list_identifier() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Lowercase, drop `:` and map `/` to `_`
///
/// LDAP and X.509 usernames may carry both characters, neither of which is
/// allowed in a Parameter Store name.
pub fn sanitize_username(username: &str) -> String {
    username
        .chars()
        .filter(|c| *c != ':')
        .map(|c| if c == '/' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Normalize a MongoDB major version to the `"<major>.<minor>"` form Atlas expects
///
/// Integer-like values gain one decimal (`"5"` becomes `"5.0"`); values that
/// already carry a `.` and values that are not numeric pass through unchanged.
pub fn format_major_version(version: &str) -> String {
    let trimmed = version.trim();
    if trimmed.contains('.') {
        return trimmed.to_string();
    }
    match trimmed.parse::<u32>() {
        Ok(major) => format!("{major}.0"),
        Err(_) => trimmed.to_string(),
    }
}
