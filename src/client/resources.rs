//! Per-resource handles and poll requests
//!
//! A handle names one resource (`cluster("abc")`, `node_pool("abc", "workers")`)
//! and offers `get()` for a single read and `poll()` for a [`PollRequest`]
//! that repeats the read through the generic [`Poller`].

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::ClustersApi;
use super::models::{Cluster, ClusterStatus, NodePool, Response};
use crate::error::{PollError, Result};
use crate::poll::{Context, Poller};

type Fetch<'a, T> = Box<dyn Fn() -> BoxFuture<'a, Result<Response<T>>> + Send + Sync + 'a>;
type Rejection<T> = Box<dyn Fn(&Response<T>) -> Option<String> + Send + Sync>;

/// Repeated GET of one resource until the response is acceptable.
///
/// Accepts only status `200` unless other codes are configured.
pub struct PollRequest<'a, T> {
    fetch: Fetch<'a, T>,
    poller: Poller<Response<T>>,
    rejections: Vec<Rejection<T>>,
}

impl<'a, T> PollRequest<'a, T> {
    fn new(fetch: Fetch<'a, T>) -> Self {
        Self {
            fetch,
            poller: Poller::new(),
            rejections: Vec::new(),
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.poller = self.poller.interval(interval);
        self
    }

    pub fn status(mut self, code: u16) -> Self {
        self.poller = self.poller.status(code);
        self
    }

    pub fn statuses(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.poller = self.poller.statuses(codes);
        self
    }

    /// Require `predicate` to hold for the response.
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Response<T>) -> bool + Send + Sync + 'static,
    {
        self.poller = self.poller.predicate(predicate);
        self
    }

    /// Stop with [`PollError::Rejected`] as soon as `check` returns a reason.
    ///
    /// For states the resource will not leave on its own, where waiting out
    /// the deadline would be pointless.
    pub fn reject_if<R>(mut self, check: R) -> Self
    where
        R: Fn(&Response<T>) -> Option<String> + Send + Sync + 'static,
    {
        self.rejections.push(Box::new(check));
        self
    }

    /// Poll until accepted, rejected, or `ctx` ends.
    pub async fn start(self, ctx: &Context) -> Result<Response<T>> {
        let PollRequest {
            fetch,
            poller,
            rejections,
        } = self;

        let poller = if poller.has_statuses() {
            poller
        } else {
            poller.status(200)
        };

        poller
            .run(ctx, |_ctx| {
                let response = fetch();
                let rejections = &rejections;
                async move {
                    let response = response.await?;
                    if let Some(reason) = rejections.iter().find_map(|check| check(&response)) {
                        return Err(PollError::Rejected(reason).into());
                    }
                    Ok((response.status(), response))
                }
            })
            .await
    }
}

/// Entry points to resource handles for any [`ClustersApi`]
pub trait ClustersApiExt: ClustersApi {
    fn cluster(&self, cluster_id: &str) -> ClusterResource<'_, Self> {
        ClusterResource {
            api: self,
            id: cluster_id.to_string(),
        }
    }

    fn node_pool(&self, cluster_id: &str, node_pool_id: &str) -> NodePoolResource<'_, Self> {
        NodePoolResource {
            api: self,
            cluster_id: cluster_id.to_string(),
            id: node_pool_id.to_string(),
        }
    }
}

impl<A: ClustersApi + ?Sized> ClustersApiExt for A {}

/// Handle to `/clusters/{id}`
pub struct ClusterResource<'a, A: ?Sized> {
    api: &'a A,
    id: String,
}

impl<'a, A: ClustersApi + ?Sized> ClusterResource<'a, A> {
    pub async fn get(&self) -> Result<Response<Cluster>> {
        self.api.get_cluster(&self.id).await
    }

    pub fn poll(&self) -> PollRequest<'a, Cluster> {
        let api = self.api;
        let id = self.id.clone();
        PollRequest::new(Box::new(move || {
            let id = id.clone();
            async move { api.get_cluster(&id).await }.boxed()
        }))
    }

    /// Handle to `/clusters/{id}/status`
    pub fn status(&self) -> ClusterStatusResource<'a, A> {
        ClusterStatusResource {
            api: self.api,
            cluster_id: self.id.clone(),
        }
    }
}

/// Handle to `/clusters/{id}/status`
pub struct ClusterStatusResource<'a, A: ?Sized> {
    api: &'a A,
    cluster_id: String,
}

impl<'a, A: ClustersApi + ?Sized> ClusterStatusResource<'a, A> {
    pub async fn get(&self) -> Result<Response<ClusterStatus>> {
        self.api.get_cluster_status(&self.cluster_id).await
    }

    pub fn poll(&self) -> PollRequest<'a, ClusterStatus> {
        let api = self.api;
        let cluster_id = self.cluster_id.clone();
        PollRequest::new(Box::new(move || {
            let cluster_id = cluster_id.clone();
            async move { api.get_cluster_status(&cluster_id).await }.boxed()
        }))
    }
}

/// Handle to `/clusters/{cluster_id}/node_pools/{id}`
pub struct NodePoolResource<'a, A: ?Sized> {
    api: &'a A,
    cluster_id: String,
    id: String,
}

impl<'a, A: ClustersApi + ?Sized> NodePoolResource<'a, A> {
    pub async fn get(&self) -> Result<Response<NodePool>> {
        self.api.get_node_pool(&self.cluster_id, &self.id).await
    }

    pub fn poll(&self) -> PollRequest<'a, NodePool> {
        let api = self.api;
        let cluster_id = self.cluster_id.clone();
        let id = self.id.clone();
        PollRequest::new(Box::new(move || {
            let cluster_id = cluster_id.clone();
            let id = id.clone();
            async move { api.get_node_pool(&cluster_id, &id).await }.boxed()
        }))
    }
}
