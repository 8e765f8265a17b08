//! Cluster display models

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Cluster, ClusterStatus};
use crate::output::PrettyPrint;
use crate::output::formatters::{
    colorize_state, format_fields, format_flag, format_timestamp, or_missing,
};

/// Cluster display model for pretty/table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ClusterDisplay {
    /// Cluster ID
    #[tabled(rename = "CLUSTER ID")]
    pub id: String,

    /// Cluster name, preferring the display name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Lifecycle state
    #[tabled(rename = "STATE")]
    pub state: String,

    /// OpenShift version
    #[tabled(rename = "VERSION")]
    pub version: String,

    /// Cloud provider and region, e.g. `aws/us-east-1`
    #[tabled(rename = "LOCATION")]
    pub location: String,

    /// API server URL
    #[tabled(rename = "API URL")]
    pub api_url: String,

    /// Web console URL
    #[tabled(skip)]
    pub console_url: String,

    #[tabled(skip)]
    pub multi_az: String,

    #[tabled(rename = "CREATED")]
    pub created: String,

    /// Provisioning error, when the cluster failed
    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Cluster> for ClusterDisplay {
    fn from(cluster: &Cluster) -> Self {
        let location = match (&cluster.cloud_provider, &cluster.region) {
            (Some(provider), Some(region)) => format!(
                "{}/{}",
                or_missing(provider.id.as_deref()),
                or_missing(region.id.as_deref())
            ),
            (Some(provider), None) => or_missing(provider.id.as_deref()),
            (None, Some(region)) => or_missing(region.id.as_deref()),
            (None, None) => or_missing(None::<&str>),
        };

        Self {
            id: or_missing(cluster.id.as_deref()),
            name: or_missing(cluster.display_name.as_deref().or(cluster.name.as_deref())),
            state: or_missing(cluster.current_state()),
            version: or_missing(cluster.openshift_version.as_deref()),
            location,
            api_url: or_missing(cluster.api.as_ref().and_then(|e| e.url.as_deref())),
            console_url: or_missing(cluster.console.as_ref().and_then(|e| e.url.as_deref())),
            multi_az: format_flag(cluster.multi_az),
            created: format_timestamp(cluster.creation_timestamp.as_ref()),
            error: cluster.status.as_ref().and_then(|s| s.provision_error()),
        }
    }
}

impl From<Cluster> for ClusterDisplay {
    fn from(cluster: Cluster) -> Self {
        Self::from(&cluster)
    }
}

impl PrettyPrint for ClusterDisplay {
    fn pretty(&self) -> String {
        let state = self.state.parse().ok();
        let mut fields = vec![
            ("Cluster", self.id.bold().to_string()),
            ("Name", self.name.clone()),
            ("State", colorize_state(state)),
            ("Version", self.version.clone()),
            ("Location", self.location.clone()),
            ("Multi-AZ", self.multi_az.clone()),
            ("API", self.api_url.clone()),
            ("Console", self.console_url.clone()),
            ("Created", self.created.clone()),
        ];
        if let Some(ref error) = self.error {
            fields.push(("Error", error.red().to_string()));
        }
        format_fields(&fields)
    }
}

/// Cluster status display model for pretty/table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ClusterStatusDisplay {
    #[tabled(rename = "CLUSTER ID")]
    pub id: String,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "DNS READY")]
    pub dns_ready: String,

    #[tabled(rename = "OIDC READY")]
    pub oidc_ready: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ClusterStatus> for ClusterStatusDisplay {
    fn from(status: &ClusterStatus) -> Self {
        Self {
            id: or_missing(status.id.as_deref()),
            state: or_missing(status.state),
            dns_ready: format_flag(status.dns_ready),
            oidc_ready: format_flag(status.oidc_ready),
            description: or_missing(status.description.as_deref()),
            error: status.provision_error(),
        }
    }
}

impl From<ClusterStatus> for ClusterStatusDisplay {
    fn from(status: ClusterStatus) -> Self {
        Self::from(&status)
    }
}

impl PrettyPrint for ClusterStatusDisplay {
    fn pretty(&self) -> String {
        let mut fields = vec![
            ("Cluster", self.id.bold().to_string()),
            ("State", colorize_state(self.state.parse().ok())),
            ("DNS ready", self.dns_ready.clone()),
            ("OIDC ready", self.oidc_ready.clone()),
            ("Description", self.description.clone()),
        ];
        if let Some(ref error) = self.error {
            fields.push(("Error", error.red().to_string()));
        }
        format_fields(&fields)
    }
}
