use thiserror::Error;

/// Failure taxonomy for everything that crosses the backend boundary.
///
/// `Validation` failures never issue a network call; the other three are
/// derived from the transport or response status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never reached the backend, or the connection dropped
    /// before a response came back.
    #[error("network error: {0}")]
    Network(String),

    /// Rejected client-side (empty project name, empty batch selection).
    #[error("{0}")]
    Validation(String),

    /// A stale id was referenced; the resource is gone on the backend.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend accepted the request but reported a failure (5xx or a
    /// tool-execution error).
    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
