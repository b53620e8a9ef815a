//! Collection API error type.

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Curl(#[from] curl::Error),

    /// Non-2xx response. The server's body text is the message when it has one.
    #[error("{}", status_message(.method, .status, .body))]
    Status {
        method: &'static str,
        status: u32,
        body: String,
    },

    #[error("invalid API JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_message(method: &str, status: &u32, body: &str) -> String {
    if body.trim().is_empty() {
        format!("{} failed ({})", method, status)
    } else {
        body.to_string()
    }
}
