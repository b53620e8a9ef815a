//! Manifest fetch error type.

/// Why a remote manifest could not be obtained. The record is skipped either way.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (connect, DNS, timeout, invalid URL, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),

    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),

    /// Body was not valid JSON.
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The blocking transfer task panicked or was cancelled.
    #[error("fetch task: {0}")]
    Task(String),
}

impl FetchError {
    /// True when the server actively refused the TCP connection.
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_couldnt_connect())
    }
}
