//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::AccessToken;
use crate::error::Result;

/// Authentication operations against the SSO token endpoint
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a refresh (offline) token for a short-lived access token
    async fn exchange_token(&self, refresh_token: &str) -> Result<AccessToken>;
}
