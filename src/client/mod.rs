//! Cluster management API client

pub mod api;
pub mod clusters_mgmt;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod resources;

pub use api::{AuthApi, ClustersApi};
pub use clusters_mgmt::{
    ClientOptions, ClustersMgmtClient, DEFAULT_API_URL, DEFAULT_CLIENT_ID, DEFAULT_TOKEN_URL,
};
#[cfg(test)]
pub use mock::MockClustersClient;
pub use resources::{ClustersApiExt, PollRequest};
