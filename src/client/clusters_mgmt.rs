//! Cluster management API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, info};
use reqwest::header::ACCEPT;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::models::{AccessToken, ApiErrorBody, Cluster, ClusterStatus, NodePool, Response};
use super::{AuthApi, ClustersApi};
use crate::error::{ApiError, ConfigError, Result};

/// Production API base URL
pub const DEFAULT_API_URL: &str = "https://api.openshift.com";

/// SSO endpoint exchanging offline tokens for access tokens
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";

/// OAuth client the offline tokens are issued to
pub const DEFAULT_CLIENT_ID: &str = "cloud-services";

const API_PREFIX: &str = "/api/clusters_mgmt/v1";

const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Access tokens closer than this to expiry are refreshed before use
const REFRESH_MARGIN_SECS: i64 = 60;

/// Decode the `exp` claim of a JWT without verifying it
fn jwt_expiry(token: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    use base64::{Engine as _, engine::general_purpose};

    #[derive(Deserialize)]
    struct JwtPayload {
        exp: i64,
    }

    // JWT format: header.payload.signature
    let payload_b64 = token.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64.trim_end_matches('='))
        .ok()?;
    let payload: JwtPayload = serde_json::from_slice(&bytes).ok()?;
    chrono::DateTime::from_timestamp(payload.exp, 0)
}

/// Endpoints and OAuth client used by [`ClustersMgmtClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub token_url: String,
    pub client_id: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

/// Cluster management API client
pub struct ClustersMgmtClient {
    http: HttpClient,
    options: ClientOptions,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    auth_state: Arc<RwLock<AuthState>>,
}

/// Internal authentication state
#[derive(Debug, Clone, Default)]
struct AuthState {
    refresh_token: Option<String>,
    access_token: Option<AccessToken>,
}

impl ClustersMgmtClient {
    /// Create a new client. Without a refresh token, an access token must be
    /// supplied with [`set_access_token`](Self::set_access_token).
    pub fn new(options: ClientOptions, refresh_token: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            options,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            auth_state: Arc::new(RwLock::new(AuthState {
                refresh_token,
                access_token: None,
            })),
        })
    }

    pub async fn set_access_token(&self, token: AccessToken) {
        self.auth_state.write().await.access_token = Some(token);
    }

    /// Current access token, e.g. to cache it between runs
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.auth_state.read().await.access_token.clone()
    }

    /// Current refresh token; the SSO service may rotate it on exchange
    pub async fn refresh_token(&self) -> Option<String> {
        self.auth_state.read().await.refresh_token.clone()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.options.api_url.trim_end_matches('/'),
            API_PREFIX,
            path
        )
    }

    /// Get a usable access token, refreshing if it is missing or about to expire
    async fn valid_token(&self) -> Result<String> {
        let (has_refresh, current) = {
            let state = self.auth_state.read().await;
            (state.refresh_token.is_some(), state.access_token.clone())
        };

        match current {
            Some(token) if !token.expires_within(chrono::Duration::seconds(REFRESH_MARGIN_SECS)) => {
                Ok(token.token)
            }
            _ if has_refresh => self.refresh().await,
            // No way to refresh: let the server judge the token
            Some(token) => Ok(token.token),
            None => Err(ConfigError::MissingToken.into()),
        }
    }

    /// Exchange the refresh token and store the new access token
    async fn refresh(&self) -> Result<String> {
        let refresh_token = self
            .auth_state
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or(ApiError::Unauthorized)?;

        info!("Refreshing access token");
        let token = self.exchange_token(&refresh_token).await?;
        let value = token.token.clone();
        self.set_access_token(token).await;
        Ok(value)
    }

    /// GET a resource under the API prefix
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Response<T>> {
        let url = self.url(path);
        let mut retried = false;

        loop {
            self.rate_limiter.until_ready().await;
            let token = self.valid_token().await?;

            debug!("GET {}", url);
            let response = self
                .http
                .get(&url)
                .bearer_auth(&token)
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(ApiError::from)?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                let can_refresh = self.auth_state.read().await.refresh_token.is_some();
                if can_refresh && !retried {
                    retried = true;
                    self.refresh().await?;
                    continue;
                }
                return Err(ApiError::Unauthorized.into());
            }

            let bytes = response.bytes().await.map_err(ApiError::from)?;

            if status.is_success() {
                let data = serde_json::from_slice::<T>(&bytes).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                return Ok(Response {
                    status: status.as_u16(),
                    body: Some(data),
                    error: None,
                });
            }

            let error = serde_json::from_slice::<ApiErrorBody>(&bytes).ok();
            debug!("GET {} returned {}", url, status);
            return Ok(Response::failed(status.as_u16(), error));
        }
    }
}

#[async_trait]
impl AuthApi for ClustersMgmtClient {
    async fn exchange_token(&self, refresh_token: &str) -> Result<AccessToken> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            refresh_token: Option<String>,
            #[serde(default)]
            expires_in: Option<i64>,
        }

        #[derive(Deserialize)]
        struct TokenError {
            error: String,
            #[serde(default)]
            error_description: Option<String>,
        }

        let response = self
            .http
            .post(&self.options.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.options.client_id.as_str()),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let reason = match serde_json::from_str::<TokenError>(&text) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("status {}", status),
            };
            return Err(ApiError::TokenExchange(reason).into());
        }

        let parsed: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        let expires_at = jwt_expiry(&parsed.access_token)
            .or_else(|| {
                parsed
                    .expires_in
                    .and_then(chrono::Duration::try_seconds)
                    .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl))
            })
            .ok_or(ApiError::InvalidToken)?;

        if let Some(rotated) = parsed.refresh_token {
            self.auth_state.write().await.refresh_token = Some(rotated);
        }

        Ok(AccessToken {
            token: parsed.access_token,
            expires_at,
        })
    }
}

#[async_trait]
impl ClustersApi for ClustersMgmtClient {
    async fn get_cluster(&self, cluster_id: &str) -> Result<Response<Cluster>> {
        let path = format!("/clusters/{}", urlencoding::encode(cluster_id));
        self.get(&path).await
    }

    async fn get_cluster_status(&self, cluster_id: &str) -> Result<Response<ClusterStatus>> {
        let path = format!("/clusters/{}/status", urlencoding::encode(cluster_id));
        self.get(&path).await
    }

    async fn get_node_pool(
        &self,
        cluster_id: &str,
        node_pool_id: &str,
    ) -> Result<Response<NodePool>> {
        let path = format!(
            "/clusters/{}/node_pools/{}",
            urlencoding::encode(cluster_id),
            urlencoding::encode(node_pool_id)
        );
        self.get(&path).await
    }
}
