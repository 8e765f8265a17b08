//! JSON output
//!
//! Every `--format json` document is an envelope: the record or wait outcome
//! under `data`, and when and by which version it was produced under `meta`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// JSON document printed by `get` and `wait` commands
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Record or wait outcome
    pub data: T,

    pub meta: Meta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    /// RFC 3339 time the document was rendered
    pub generated_at: String,

    /// clusterwait version
    pub version: String,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Meta {
                generated_at: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Wrap `data` in an [`Envelope`] and render it pretty-printed.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope::new(data))
}
