//! Node pool display model

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::client::models::NodePool;
use crate::output::PrettyPrint;
use crate::output::formatters::{format_fields, or_missing};

/// Node pool display model for pretty/table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NodePoolDisplay {
    #[tabled(rename = "NODE POOL")]
    pub id: String,

    /// Current over desired replicas, e.g. `2/3`
    #[tabled(rename = "REPLICAS")]
    pub replicas: String,

    /// Autoscaling range, e.g. `2-5`
    #[tabled(rename = "AUTOSCALING")]
    pub autoscaling: String,

    #[tabled(rename = "INSTANCE TYPE")]
    pub instance_type: String,

    #[tabled(rename = "VERSION")]
    pub version: String,

    #[tabled(skip)]
    pub subnet: String,

    #[tabled(skip)]
    pub message: String,

    #[tabled(skip)]
    pub ready: bool,
}

impl From<&NodePool> for NodePoolDisplay {
    fn from(pool: &NodePool) -> Self {
        let autoscaling = match &pool.autoscaling {
            Some(a) => format!(
                "{}-{}",
                or_missing(a.min_replica),
                or_missing(a.max_replica)
            ),
            None => or_missing(None::<u32>),
        };

        Self {
            id: or_missing(pool.id.as_deref()),
            replicas: format!(
                "{}/{}",
                or_missing(pool.current_replicas()),
                or_missing(pool.desired_replicas())
            ),
            autoscaling,
            instance_type: or_missing(
                pool.aws_node_pool
                    .as_ref()
                    .and_then(|a| a.instance_type.as_deref()),
            ),
            version: or_missing(pool.version.as_ref().and_then(|v| v.id.as_deref())),
            subnet: or_missing(pool.subnet.as_deref()),
            message: or_missing(pool.status.as_ref().and_then(|s| s.message.as_deref())),
            ready: pool.is_ready(),
        }
    }
}

impl From<NodePool> for NodePoolDisplay {
    fn from(pool: NodePool) -> Self {
        Self::from(&pool)
    }
}

impl PrettyPrint for NodePoolDisplay {
    fn pretty(&self) -> String {
        let replicas = if self.ready {
            self.replicas.green().to_string()
        } else {
            self.replicas.yellow().to_string()
        };

        format_fields(&[
            ("Node pool", self.id.bold().to_string()),
            ("Replicas", replicas),
            ("Autoscaling", self.autoscaling.clone()),
            ("Instance type", self.instance_type.clone()),
            ("Version", self.version.clone()),
            ("Subnet", self.subnet.clone()),
            ("Message", self.message.clone()),
        ])
    }
}
