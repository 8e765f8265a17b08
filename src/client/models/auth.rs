//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer access token with its expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The JWT access token string
    pub token: String,

    /// Token expiration time, from the JWT `exp` claim
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token expires within `margin` from now.
    pub fn expires_within(&self, margin: chrono::Duration) -> bool {
        self.expires_at - margin < Utc::now()
    }
}
