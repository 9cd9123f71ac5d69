//! Add-in directory error types.

use thiserror::Error;

/// Maximum number of body characters shown when an upstream error is displayed.
const BODY_EXCERPT_LEN: usize = 512;

/// A specialized Result type for add-in directory operations.
pub type AddinResult<T> = std::result::Result<T, AddinError>;

/// Errors returned by the add-in directory client.
///
/// Each upstream failure kind is a separate variant so callers can decide
/// on recovery (for example retrying network failures) without inspecting
/// messages. Nothing is retried inside the client.
#[derive(Debug, Error)]
pub enum AddinError {
    /// A caller-supplied argument failed a local precondition.
    /// No request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The remote service answered with a non-2xx status.
    #[error("Upstream returned HTTP {status}: {}", excerpt(.body))]
    UpstreamHttp { status: u16, body: String },

    /// The request could not be completed (DNS, connect, timeout, reset).
    #[error("Upstream network error: {0}")]
    UpstreamNetwork(#[source] reqwest::Error),

    /// The remote service answered 2xx with a body that is not valid JSON.
    #[error("Upstream returned an invalid JSON body: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    /// The caller cancelled the request before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl AddinError {
    /// Create a new "invalid argument" error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UpstreamHttp { .. } => "upstream_http",
            Self::UpstreamNetwork(_) => "upstream_network",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Cancelled => "cancelled",
            Self::Client(_) => "client",
        }
    }

    /// HTTP status of an upstream error response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a caller could reasonably retry the same request.
    ///
    /// True for network failures and 5xx responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::UpstreamNetwork(_) => true,
            Self::UpstreamHttp { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the underlying network error was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::UpstreamNetwork(e) if e.is_timeout())
    }

    /// Structured representation handed back to MCP clients.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::UpstreamHttp { status, body } = self {
            error["status"] = serde_json::json!(status);
            error["body"] = serde_json::json!(excerpt(body));
        }
        serde_json::json!({ "error": error })
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_LEN {
        return body.to_string();
    }
    let mut short: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    short.push('…');
    short
}
