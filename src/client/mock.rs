//! Mock cluster management API client for testing
//!
//! Provides a scripted implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AuthApi, ClustersApi};
use super::models::{AccessToken, Cluster, ClusterStatus, NodePool, Response};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Each resource replays its scripted responses in order, repeating the last
/// one once the script runs out. An unscripted resource answers `404`.
///
/// # Example
/// ```ignore
/// let mock = MockClustersClient::new()
///     .with_cluster_responses(vec![Response::failed(404, None), Response::ok(cluster)]);
///
/// let first = mock.get_cluster("abc").await?;
/// assert_eq!(first.status(), 404);
/// ```
#[derive(Default)]
pub struct MockClustersClient {
    /// Responses for get_cluster
    clusters: Arc<Mutex<Vec<Response<Cluster>>>>,
    /// Responses for get_cluster_status
    statuses: Arc<Mutex<Vec<Response<ClusterStatus>>>>,
    /// Responses for get_node_pool
    node_pools: Arc<Mutex<Vec<Response<NodePool>>>>,
    /// Error returned on the given (1-based, all methods) call number
    error_on_call: Arc<Mutex<Option<(usize, ApiError)>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub exchange_token: usize,
    pub get_cluster: usize,
    pub get_cluster_status: usize,
    pub get_node_pool: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.exchange_token + self.get_cluster + self.get_cluster_status + self.get_node_pool
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "get_cluster")
    pub method: String,
    pub cluster_id: String,
    pub node_pool_id: Option<String>,
}

impl MockClustersClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster_responses(self, responses: Vec<Response<Cluster>>) -> Self {
        *self.clusters.try_lock().expect("fresh mock") = responses;
        self
    }

    pub fn with_status_responses(self, responses: Vec<Response<ClusterStatus>>) -> Self {
        *self.statuses.try_lock().expect("fresh mock") = responses;
        self
    }

    pub fn with_node_pool_responses(self, responses: Vec<Response<NodePool>>) -> Self {
        *self.node_pools.try_lock().expect("fresh mock") = responses;
        self
    }

    /// Fail the `call`-th API call (1-based, counted across all methods).
    pub fn with_error_on_call(self, call: usize, error: ApiError) -> Self {
        *self.error_on_call.try_lock().expect("fresh mock") = Some((call, error));
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Record a call and return the injected error if this call should fail.
    async fn record(
        &self,
        method: &str,
        cluster_id: &str,
        node_pool_id: Option<&str>,
        bump: impl FnOnce(&mut CallCounts) -> usize,
    ) -> Result<usize> {
        let (index, total) = {
            let mut counts = self.call_count.lock().await;
            let index = bump(&mut counts);
            (index, counts.total())
        };

        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            cluster_id: cluster_id.to_string(),
            node_pool_id: node_pool_id.map(str::to_string),
        });

        let mut error = self.error_on_call.lock().await;
        if matches!(error.as_ref(), Some((n, _)) if *n == total) {
            if let Some((_, err)) = error.take() {
                return Err(err.into());
            }
        }
        Ok(index)
    }
}

/// Scripted response for the `index`-th call (0-based)
fn scripted<T: Clone>(responses: &[Response<T>], index: usize) -> Response<T> {
    match responses.get(index).or_else(|| responses.last()) {
        Some(response) => response.clone(),
        None => Response::failed(404, None),
    }
}

#[async_trait]
impl AuthApi for MockClustersClient {
    async fn exchange_token(&self, refresh_token: &str) -> Result<AccessToken> {
        self.record("exchange_token", "", None, |c| {
            c.exchange_token += 1;
            c.exchange_token - 1
        })
        .await?;

        Ok(AccessToken {
            token: format!("access-for-{}", refresh_token),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        })
    }
}

#[async_trait]
impl ClustersApi for MockClustersClient {
    async fn get_cluster(&self, cluster_id: &str) -> Result<Response<Cluster>> {
        let index = self
            .record("get_cluster", cluster_id, None, |c| {
                c.get_cluster += 1;
                c.get_cluster - 1
            })
            .await?;
        Ok(scripted(&self.clusters.lock().await, index))
    }

    async fn get_cluster_status(&self, cluster_id: &str) -> Result<Response<ClusterStatus>> {
        let index = self
            .record("get_cluster_status", cluster_id, None, |c| {
                c.get_cluster_status += 1;
                c.get_cluster_status - 1
            })
            .await?;
        Ok(scripted(&self.statuses.lock().await, index))
    }

    async fn get_node_pool(
        &self,
        cluster_id: &str,
        node_pool_id: &str,
    ) -> Result<Response<NodePool>> {
        let index = self
            .record("get_node_pool", cluster_id, Some(node_pool_id), |c| {
                c.get_node_pool += 1;
                c.get_node_pool - 1
            })
            .await?;
        Ok(scripted(&self.node_pools.lock().await, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_resource_is_not_found() {
        let mock = MockClustersClient::new();
        let response = mock.get_cluster("abc").await.unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_last_response_repeats() {
        let mock = MockClustersClient::new().with_cluster_responses(vec![
            Response::failed(404, None),
            Response::ok(Cluster::default()),
        ]);

        assert_eq!(mock.get_cluster("abc").await.unwrap().status(), 404);
        assert_eq!(mock.get_cluster("abc").await.unwrap().status(), 200);
        assert_eq!(mock.get_cluster("abc").await.unwrap().status(), 200);
        assert_eq!(mock.call_counts().await.get_cluster, 3);
    }

    #[tokio::test]
    async fn test_error_injected_once() {
        let mock = MockClustersClient::new()
            .with_error_on_call(1, ApiError::Network("boom".to_string()));

        assert!(mock.get_node_pool("abc", "workers").await.is_err());
        assert!(mock.get_node_pool("abc", "workers").await.is_ok());

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].node_pool_id.as_deref(), Some("workers"));
    }
}
