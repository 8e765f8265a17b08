//! Reusable command handlers
//!
//! Shared flows for commands that read one resource (`get`) and commands
//! that poll one until it is acceptable (`wait`).

mod get;
mod wait;

pub use get::{print_record, require_body};
pub use wait::{WaitOutcome, WaitSession};
