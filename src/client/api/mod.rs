//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Token exchange with the SSO service
//! - [`ClustersApi`] - Single-resource reads from the cluster management API

mod auth;
mod clusters;

pub use auth::AuthApi;
pub use clusters::ClustersApi;
