//! Cluster commands

use log::{debug, warn};

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{WaitOutcome, WaitSession, print_record};
use crate::cli::{ClusterWaitArgs, CommandContext};
use crate::client::models::{Cluster, ClusterState, ClusterStatus, Response};
use crate::client::{ClustersApiExt, PollRequest};
use crate::error::Result;
use crate::models::{ClusterDisplay, ClusterStatusDisplay};

/// Run the `cluster get` command
pub async fn get(opts: &GlobalOptions, cluster_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let response = ctx.client.cluster(cluster_id).get().await?;

    print_record::<Cluster, ClusterDisplay>(response, &format!("cluster {}", cluster_id), ctx.format)
}

/// Run the `cluster status` command
pub async fn status(opts: &GlobalOptions, cluster_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let response = ctx.client.cluster(cluster_id).status().get().await?;

    print_record::<ClusterStatus, ClusterStatusDisplay>(
        response,
        &format!("cluster {} status", cluster_id),
        ctx.format,
    )
}

/// Run the `cluster wait` command
pub async fn wait(opts: &GlobalOptions, args: &ClusterWaitArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let settings = args.wait.resolve(&ctx.config.preferences);

    let request = ctx
        .client
        .cluster(&args.cluster_id)
        .poll()
        .interval(settings.interval)
        .statuses(settings.statuses.iter().copied());

    let (request, summary) = if args.gone {
        (
            request.status(404),
            format!("Cluster {} no longer exists", args.cluster_id),
        )
    } else {
        let states = target_states(&args.states);
        let summary = format!(
            "Cluster {} is {}",
            args.cluster_id,
            join_states(&states)
        );
        (accept_states(request, states), summary)
    };

    let session = WaitSession::start(
        &settings,
        ctx.format,
        format!("Waiting for cluster {}", args.cluster_id),
    );
    let (response, elapsed) = session.run(request).await?;
    debug!(
        "Cluster {} accepted with status {} after {:?}",
        args.cluster_id,
        response.status(),
        elapsed
    );

    WaitOutcome::<ClusterDisplay>::new(summary, response, elapsed).print(ctx.format)
}

/// States to wait for, `ready` when none were given.
fn target_states(requested: &[ClusterState]) -> Vec<ClusterState> {
    if requested.is_empty() {
        vec![ClusterState::Ready]
    } else {
        requested.to_vec()
    }
}

fn join_states(states: &[ClusterState]) -> String {
    states
        .iter()
        .map(ClusterState::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Accept responses whose cluster is in one of `states`.
///
/// Responses without a body (an accepted non-200 status) pass the state
/// check. Unless `error` is itself a target, a cluster in the error state
/// ends the wait immediately.
fn accept_states(
    request: PollRequest<'_, Cluster>,
    states: Vec<ClusterState>,
) -> PollRequest<'_, Cluster> {
    let request = if states.contains(&ClusterState::Error) {
        request
    } else {
        request.reject_if(failure_reason)
    };

    request.predicate(move |response| {
        response.body().is_none_or(|cluster| {
            cluster
                .current_state()
                .is_some_and(|state| states.contains(&state))
        })
    })
}

fn failure_reason(response: &Response<Cluster>) -> Option<String> {
    let cluster = response.body()?;
    if cluster.current_state() != Some(ClusterState::Error) {
        return None;
    }

    let detail = cluster.status.as_ref().and_then(|status| {
        status
            .provision_error()
            .or_else(|| status.description.clone())
    });
    let id = cluster.id.as_deref().unwrap_or("cluster");
    warn!("Cluster {} entered the error state", id);

    Some(match detail {
        Some(detail) => format!("cluster {} is in error state: {}", id, detail),
        None => format!("cluster {} is in error state", id),
    })
}
