//! clusterwait - wait for cluster management API resources to become ready
//!
//! The [`poll`] module holds the generic poll-until-acceptable loop; the
//! [`client`] module applies it to clusters and node pools.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod poll;
