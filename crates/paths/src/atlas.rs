//! # Atlas Public API v1.0 Paths
//!
//! Every route the handlers call, relative to the API root
//! (`https://cloud.mongodb.com/api/atlas/v1.0`).

use crate::builder::{ApiPath, PathBuilder};

const GROUPS: &str = "groups";

fn group_scoped(group_id: &str, collection: &str) -> PathBuilder {
    PathBuilder::new()
        .segment(GROUPS)
        .segment(group_id)
        .segment(collection)
}

/// `/groups`
pub fn projects() -> ApiPath {
    PathBuilder::new().segment(GROUPS).build()
}

/// `/groups/{groupId}`
pub fn project(group_id: &str) -> ApiPath {
    PathBuilder::new().segment(GROUPS).segment(group_id).build()
}

/// `/groups/{groupId}/clusters`
pub fn clusters(group_id: &str) -> ApiPath {
    group_scoped(group_id, "clusters").build()
}

/// `/groups/{groupId}/clusters/{clusterName}`
pub fn cluster(group_id: &str, cluster_name: &str) -> ApiPath {
    group_scoped(group_id, "clusters")
        .segment(cluster_name)
        .build()
}

/// `/groups/{groupId}/databaseUsers`
pub fn database_users(group_id: &str) -> ApiPath {
    group_scoped(group_id, "databaseUsers").build()
}

/// `/groups/{groupId}/databaseUsers/{databaseName}/{username}`
pub fn database_user(group_id: &str, database_name: &str, username: &str) -> ApiPath {
    group_scoped(group_id, "databaseUsers")
        .segment(database_name)
        .segment(username)
        .build()
}

/// `/groups/{groupId}/containers`
pub fn containers(group_id: &str) -> ApiPath {
    group_scoped(group_id, "containers").build()
}

/// `/groups/{groupId}/containers/{containerId}`
pub fn container(group_id: &str, container_id: &str) -> ApiPath {
    group_scoped(group_id, "containers")
        .segment(container_id)
        .build()
}

/// `/groups/{groupId}/peers`
pub fn peers(group_id: &str) -> ApiPath {
    group_scoped(group_id, "peers").build()
}

/// `/groups/{groupId}/peers/{peerId}`
pub fn peer(group_id: &str, peer_id: &str) -> ApiPath {
    group_scoped(group_id, "peers").segment(peer_id).build()
}

/// `/groups/{groupId}/accessList`
pub fn access_list(group_id: &str) -> ApiPath {
    group_scoped(group_id, "accessList").build()
}

/// `/groups/{groupId}/accessList/{entry}` where entry is an IP, CIDR block or security group.
pub fn access_list_entry(group_id: &str, entry: &str) -> ApiPath {
    group_scoped(group_id, "accessList").segment(entry).build()
}

/// `/groups/{groupId}/encryptionAtRest`
pub fn encryption_at_rest(group_id: &str) -> ApiPath {
    group_scoped(group_id, "encryptionAtRest").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_paths() {
        assert_eq!(clusters("P1").to_string(), "/groups/P1/clusters");
        assert_eq!(cluster("P1", "C1").to_string(), "/groups/P1/clusters/C1");
    }

    #[test]
    fn test_database_user_path_orders_database_before_username() {
        assert_eq!(
            database_user("P1", "admin", "alice").to_string(),
            "/groups/P1/databaseUsers/admin/alice"
        );
    }

    #[test]
    fn test_project_paths() {
        assert_eq!(projects().to_string(), "/groups");
        assert_eq!(project("P1").to_string(), "/groups/P1");
    }

    #[test]
    fn test_network_paths() {
        assert_eq!(container("P1", "c-1").to_string(), "/groups/P1/containers/c-1");
        assert_eq!(peer("P1", "p-1").to_string(), "/groups/P1/peers/p-1");
        assert_eq!(
            encryption_at_rest("P1").to_string(),
            "/groups/P1/encryptionAtRest"
        );
    }
}
