//! Client for the remote addon-collection API.
//!
//! Two calls: fetch the collection attached to an auth key, and replace it.
//! A fetched collection has the `{ "result": { "addons": [...] } }` layout,
//! so it can be saved and synced like any other catalog.

mod error;

pub use error::ApiError;

use serde::Serialize;
use serde_json::Value;

use crate::config::SyncConfig;
use crate::http::{self, HttpOptions, HttpResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionGetRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    auth_key: &'a str,
    update: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSetRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    auth_key: &'a str,
    addons: &'a [Value],
}

/// Blocking collection API client. Call from `spawn_blocking` in async code.
#[derive(Debug, Clone)]
pub struct CollectionClient {
    base: String,
    http: HttpOptions,
}

impl CollectionClient {
    /// `base` is the API root, e.g. `https://api.strem.io/api/`.
    pub fn new(base: impl Into<String>, http: HttpOptions) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base, http }
    }

    pub fn from_config(cfg: &SyncConfig) -> Self {
        Self::new(cfg.api_base.clone(), HttpOptions::from(&cfg.http()))
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}{}", self.base, method)
    }

    fn call<T: Serialize>(&self, method: &str, body: &T) -> Result<HttpResponse, ApiError> {
        let body = serde_json::to_vec(body)?;
        let url = self.endpoint(method);
        tracing::debug!(%url, "collection API call");
        Ok(http::post_json(&url, &body, &self.http)?)
    }

    /// Fetch the addon collection for `auth_key`.
    pub fn get_addon_collection(&self, auth_key: &str) -> Result<Value, ApiError> {
        let request = CollectionGetRequest {
            kind: "AddonCollectionGet",
            auth_key,
            update: true,
        };
        let response = self.call("addonCollectionGet", &request)?;
        if !response.is_success() {
            return Err(ApiError::Status {
                method: "addonCollectionGet",
                status: response.status,
                body: String::new(),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Replace the addon collection for `auth_key` with `addons`.
    pub fn set_addon_collection(&self, auth_key: &str, addons: &[Value]) -> Result<Value, ApiError> {
        let request = CollectionSetRequest {
            kind: "AddonCollectionSet",
            auth_key,
            addons,
        };
        let response = self.call("addonCollectionSet", &request)?;
        if !response.is_success() {
            return Err(ApiError::Status {
                method: "addonCollectionSet",
                status: response.status,
                body: response.text(),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}
