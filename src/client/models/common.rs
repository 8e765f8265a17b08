//! Shared model types: object references, error documents, responses

use serde::{Deserialize, Serialize};

/// Reference to another API object.
///
/// The server returns these as links (`kind` ends in `Link`) carrying only
/// `kind`, `id` and `href`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl ObjectRef {
    pub fn is_link(&self) -> bool {
        is_link_kind(self.kind.as_deref())
    }
}

/// Whether an object `kind` names a link rather than a full object.
pub fn is_link_kind(kind: Option<&str>) -> bool {
    kind.is_some_and(|k| k.ends_with("Link"))
}

/// Error document returned with non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Error code, e.g. `CLUSTERS-MGMT-404`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Server-side operation identifier, useful in support requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// Outcome of a single GET.
///
/// Every HTTP response maps to a `Response`, whatever its status. The body is
/// decoded for 2xx responses; the error document for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub status: u16,
    pub body: Option<T>,
    pub error: Option<ApiErrorBody>,
}

impl<T> Response<T> {
    /// Successful response carrying `body`.
    pub fn ok(body: T) -> Self {
        Self {
            status: 200,
            body: Some(body),
            error: None,
        }
    }

    /// Non-2xx response with an optional error document.
    pub fn failed(status: u16, error: Option<ApiErrorBody>) -> Self {
        Self {
            status,
            body: None,
            error,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn error(&self) -> Option<&ApiErrorBody> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error reason from the server, or a generic message for the status.
    pub fn describe_error(&self) -> String {
        match self.error.as_ref().and_then(|e| e.reason.as_deref()) {
            Some(reason) => format!("{} ({})", reason, self.status),
            None => format!("Unexpected status code: {}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_detection() {
        let link = ObjectRef {
            kind: Some("CloudProviderLink".to_string()),
            id: Some("aws".to_string()),
            href: Some("/api/clusters_mgmt/v1/cloud_providers/aws".to_string()),
        };
        assert!(link.is_link());

        let full = ObjectRef {
            kind: Some("CloudProvider".to_string()),
            ..Default::default()
        };
        assert!(!full.is_link());
        assert!(!ObjectRef::default().is_link());
    }

    #[test]
    fn test_error_body_deserialization() {
        let json = r#"{
            "kind": "Error",
            "id": "404",
            "href": "/api/clusters_mgmt/v1/errors/404",
            "code": "CLUSTERS-MGMT-404",
            "reason": "Cluster 'abc' not found",
            "operation_id": "op-1"
        }"#;

        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.code.as_deref(), Some("CLUSTERS-MGMT-404"));
        assert_eq!(body.operation_id.as_deref(), Some("op-1"));
    }

    #[test]
    fn test_describe_error() {
        let with_reason: Response<()> = Response::failed(
            404,
            Some(ApiErrorBody {
                reason: Some("Cluster 'abc' not found".to_string()),
                ..Default::default()
            }),
        );
        assert_eq!(with_reason.describe_error(), "Cluster 'abc' not found (404)");
        assert!(!with_reason.is_success());

        let bare: Response<()> = Response::failed(502, None);
        assert!(bare.describe_error().contains("502"));
    }
}
