//! Display model implementations for pretty, table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization. Attributes the server
//! did not send render as `--`.

mod cluster;
mod node_pool;

pub use cluster::{ClusterDisplay, ClusterStatusDisplay};
pub use node_pool::NodePoolDisplay;
