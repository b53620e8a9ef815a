//! Classify fetch failures: which ones are reported and which are expected noise.

use url::Url;

use super::FetchError;

/// What to do with a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Locally hosted addon source is not running; skip without reporting.
    LocalSourceOffline,
    /// Anything else; report and skip.
    Reported,
}

/// True if `url` points at the loopback addon source on `local_port`.
pub fn is_local_source(url: &str, local_port: u16) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let loopback = matches!(parsed.host_str(), Some("127.0.0.1") | Some("localhost"));
    loopback && parsed.port_or_known_default() == Some(local_port)
}

/// Classify a fetch failure for `url`.
pub fn classify(url: &str, err: &FetchError, local_port: u16) -> FailureKind {
    if err.is_connection_refused() && is_local_source(url, local_port) {
        FailureKind::LocalSourceOffline
    } else {
        FailureKind::Reported
    }
}
