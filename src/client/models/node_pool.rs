//! Node pool models

use serde::{Deserialize, Serialize};

use super::common::{ObjectRef, is_link_kind};

/// Autoscaling bounds of a node pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePoolAutoscaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replica: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replica: Option<u32>,
}

/// AWS specific node pool settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwsNodePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

/// Observed state of a node pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePoolStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_replicas: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Node pool of a hosted control plane cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Desired replicas; absent when autoscaling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<NodePoolAutoscaling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_node_pool: Option<AwsNodePool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ObjectRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NodePoolStatus>,
}

impl NodePool {
    pub fn is_link(&self) -> bool {
        is_link_kind(self.kind.as_deref())
    }

    /// Replica count the pool is converging on: the fixed replica count, or
    /// the autoscaling minimum.
    pub fn desired_replicas(&self) -> Option<u32> {
        self.replicas.or_else(|| {
            self.autoscaling
                .as_ref()
                .and_then(|a| a.min_replica)
        })
    }

    pub fn current_replicas(&self) -> Option<u32> {
        self.status.as_ref().and_then(|s| s.current_replicas)
    }

    /// Whether enough nodes are up to satisfy the desired replica count.
    pub fn is_ready(&self) -> bool {
        match (self.desired_replicas(), self.current_replicas()) {
            (Some(desired), Some(current)) => current >= desired,
            _ => false,
        }
    }
}
