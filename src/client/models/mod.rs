//! Cluster management API data models
//!
//! Optional attributes are `Option` fields: `None` means the server did not
//! send the attribute.

mod auth;
mod cluster;
mod common;
mod node_pool;

pub use auth::AccessToken;
pub use cluster::{Cluster, ClusterState, ClusterStatus, Endpoint};
pub use common::{ApiErrorBody, ObjectRef, Response};
pub use node_pool::{AwsNodePool, NodePool, NodePoolAutoscaling, NodePoolStatus};
