//! Cluster management API trait

use async_trait::async_trait;

use crate::client::models::{Cluster, ClusterStatus, NodePool, Response};
use crate::error::Result;

/// Single-resource reads from the cluster management API.
///
/// Each method performs exactly one request. Any HTTP status comes back as a
/// [`Response`]; only transport and decoding failures are errors.
#[async_trait]
pub trait ClustersApi: Send + Sync {
    /// Fetch a cluster by ID
    async fn get_cluster(&self, cluster_id: &str) -> Result<Response<Cluster>>;

    /// Fetch the detailed status of a cluster
    async fn get_cluster_status(&self, cluster_id: &str) -> Result<Response<ClusterStatus>>;

    /// Fetch a node pool of a cluster
    async fn get_node_pool(
        &self,
        cluster_id: &str,
        node_pool_id: &str,
    ) -> Result<Response<NodePool>>;
}
