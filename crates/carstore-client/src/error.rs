//! Error types for the carstore API client.

use thiserror::Error;

/// Errors produced by [`CarstoreClient`](crate::CarstoreClient) calls.
///
/// Every variant is fatal for the call that produced it. The client never
/// retries; retry and backoff policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be assembled. Nothing was sent over the wire.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A network-level failure reaching the remote API, including timeouts.
    #[error("Network error: {0}")]
    Network(String),

    /// The response status fell outside the documented success set for the
    /// operation.
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// A success status arrived but its body did not parse into the
    /// expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// The HTTP status code, for the variant that carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// `true` when the failure happened before any request left the
    /// process.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
