//! Cluster models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ObjectRef, is_link_kind};

/// Lifecycle state of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterState {
    Error,
    Hibernating,
    Installing,
    Pending,
    PoweringDown,
    Ready,
    Resuming,
    Uninstalling,
    Validating,
    Waiting,
    #[serde(other)]
    Unknown,
}

impl ClusterState {
    pub const ALL: [ClusterState; 11] = [
        ClusterState::Error,
        ClusterState::Hibernating,
        ClusterState::Installing,
        ClusterState::Pending,
        ClusterState::PoweringDown,
        ClusterState::Ready,
        ClusterState::Resuming,
        ClusterState::Uninstalling,
        ClusterState::Validating,
        ClusterState::Waiting,
        ClusterState::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterState::Error => "error",
            ClusterState::Hibernating => "hibernating",
            ClusterState::Installing => "installing",
            ClusterState::Pending => "pending",
            ClusterState::PoweringDown => "powering_down",
            ClusterState::Ready => "ready",
            ClusterState::Resuming => "resuming",
            ClusterState::Uninstalling => "uninstalling",
            ClusterState::Validating => "validating",
            ClusterState::Waiting => "waiting",
            ClusterState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ClusterState::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = ClusterState::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown cluster state '{}' (valid: {})", s, valid.join(", "))
            })
    }
}

/// Endpoint reference with a URL (API server, console)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Detailed status of a cluster, also served at `/clusters/{id}/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ClusterState>,

    /// Detailed description of the state, mostly set on errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ready: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_ready: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_error_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limited_support_reason_count: Option<u32>,
}

impl ClusterStatus {
    pub fn is_link(&self) -> bool {
        is_link_kind(self.kind.as_deref())
    }

    /// Provisioning error as `code: message`, if the server reported one.
    pub fn provision_error(&self) -> Option<String> {
        match (&self.provision_error_code, &self.provision_error_message) {
            (Some(code), Some(msg)) => Some(format!("{}: {}", code, msg)),
            (Some(code), None) => Some(code.clone()),
            (None, Some(msg)) => Some(msg.clone()),
            (None, None) => None,
        }
    }
}

/// Cluster resource.
///
/// Attributes the server did not send stay `None`, which is distinct from an
/// explicit `false` or `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ClusterState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Endpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<Endpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<ObjectRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<ObjectRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_az: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClusterStatus>,
}

impl Cluster {
    pub fn is_link(&self) -> bool {
        is_link_kind(self.kind.as_deref())
    }

    /// Lifecycle state, preferring the top-level attribute over the embedded
    /// status.
    pub fn current_state(&self) -> Option<ClusterState> {
        self.state
            .or_else(|| self.status.as_ref().and_then(|s| s.state))
    }

    pub fn is_ready(&self) -> bool {
        self.current_state() == Some(ClusterState::Ready)
    }
}
