//! Remote manifest fetching.
//!
//! GETs the manifest published at an addon's `transportUrl` and parses it as
//! JSON. No retries; timeouts are libcurl defaults unless configured.

mod classify;
mod error;

pub use classify::{classify, is_local_source, FailureKind};
pub use error::FetchError;

use serde_json::Value;

use crate::config::{SyncConfig, DEFAULT_LOCAL_SOURCE_PORT};
use crate::http::{self, HttpOptions};

/// Fetches remote manifests. Cheap to clone; holds only options.
#[derive(Debug, Clone)]
pub struct ManifestFetcher {
    http: HttpOptions,
    local_source_port: u16,
}

impl Default for ManifestFetcher {
    fn default() -> Self {
        Self {
            http: HttpOptions::default(),
            local_source_port: DEFAULT_LOCAL_SOURCE_PORT,
        }
    }
}

impl ManifestFetcher {
    pub fn new(http: HttpOptions, local_source_port: u16) -> Self {
        Self {
            http,
            local_source_port,
        }
    }

    pub fn from_config(cfg: &SyncConfig) -> Self {
        Self::new(HttpOptions::from(&cfg.http()), cfg.local_source_port)
    }

    /// GET and parse the manifest at `url` on the current thread.
    pub fn fetch_blocking(&self, url: &str) -> Result<Value, FetchError> {
        let response = http::get(url, &self.http)?;
        if !response.is_success() {
            return Err(FetchError::Http(response.status));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// GET and parse the manifest at `url` without blocking the runtime.
    pub async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        let this = self.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || this.fetch_blocking(&url))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))?
    }

    /// Classify a failed fetch of `url` against this fetcher's local source port.
    pub fn classify(&self, url: &str, err: &FetchError) -> FailureKind {
        classify(url, err, self.local_source_port)
    }
}
