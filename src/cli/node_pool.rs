//! Node pool commands

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{WaitOutcome, WaitSession, print_record};
use crate::cli::{CommandContext, WaitArgs};
use crate::client::models::NodePool;
use crate::client::{ClustersApiExt, PollRequest};
use crate::error::Result;
use crate::models::NodePoolDisplay;

/// Run the `node-pool get` command
pub async fn get(opts: &GlobalOptions, cluster_id: &str, node_pool_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let response = ctx.client.node_pool(cluster_id, node_pool_id).get().await?;

    print_record::<NodePool, NodePoolDisplay>(
        response,
        &format!("node pool {}/{}", cluster_id, node_pool_id),
        ctx.format,
    )
}

/// Run the `node-pool wait` command
pub async fn wait(
    opts: &GlobalOptions,
    cluster_id: &str,
    node_pool_id: &str,
    wait: &WaitArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let settings = wait.resolve(&ctx.config.preferences);

    let request = ctx
        .client
        .node_pool(cluster_id, node_pool_id)
        .poll()
        .interval(settings.interval)
        .statuses(settings.statuses.iter().copied());

    let session = WaitSession::start(
        &settings,
        ctx.format,
        format!("Waiting for node pool {} in cluster {}", node_pool_id, cluster_id),
    );
    let (response, elapsed) = session.run(accept_ready(request)).await?;
    debug!(
        "Node pool {} accepted with status {} after {:?}",
        node_pool_id,
        response.status(),
        elapsed
    );

    WaitOutcome::<NodePoolDisplay>::new(
        format!("Node pool {} has its desired replicas", node_pool_id),
        response,
        elapsed,
    )
    .print(ctx.format)
}

/// Accept node pools whose current replicas reach the desired count.
fn accept_ready(request: PollRequest<'_, NodePool>) -> PollRequest<'_, NodePool> {
    request.predicate(|response| response.body().is_none_or(NodePool::is_ready))
}
