//! Single-resource read handler
//!
//! Provides the fetch → check status → convert → print flow shared by the
//! `get` and `status` commands.

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::models::Response;
use crate::error::{ApiError, Error, Result};
use crate::output::{Formattable, PrettyPrint};

/// Unwrap the body of a successful response.
///
/// Any other status becomes an error carrying the server's reason, e.g.
/// `cluster 2abc: Cluster '2abc' not found (404)`.
pub fn require_body<T>(response: Response<T>, resource: &str) -> Result<T> {
    if !response.is_success() {
        return Err(Error::Other(format!(
            "{}: {}",
            resource,
            response.describe_error()
        )));
    }

    response.into_body().ok_or_else(|| {
        ApiError::InvalidResponse(format!("{} response had no body", resource)).into()
    })
}

/// Convert a response body to its display type and print it.
///
/// # Type Parameters
///
/// * `T` - The API model type (e.g., `Cluster`, `NodePool`)
/// * `D` - The display type that implements `From<T>`, `PrettyPrint`, `Tabled`, and `Serialize`
///
/// # Example
///
/// ```ignore
/// let response = ctx.client.cluster(&id).get().await?;
/// print_record::<Cluster, ClusterDisplay>(response, &format!("cluster {}", id), ctx.format)?;
/// ```
pub fn print_record<T, D>(response: Response<T>, resource: &str, format: OutputFormat) -> Result<()>
where
    D: From<T> + PrettyPrint + Tabled + Serialize,
{
    debug!("Fetched {} with status {}", resource, response.status());

    let body = require_body(response, resource)?;
    D::from(body).print(format)
}
