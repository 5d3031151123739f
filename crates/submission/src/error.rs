use thiserror::Error;

/// Failure talking to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The base URL could not be turned into an endpoint.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The request never got an HTTP response (connection refused, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    ///
    /// The body was JSON; `message` is its `error` field when present and
    /// non-empty.
    #[error("server rejected submission ({status}): {}", .message.as_deref().unwrap_or("no error message"))]
    Rejected { status: u16, message: Option<String> },

    /// A response body that was not JSON, whatever the status.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}
