//! Integration test: collection API client against the local test server.

mod common;

use addonsync_core::api::{ApiError, CollectionClient};
use addonsync_core::http::HttpOptions;
use common::manifest_server::{self, Route};
use serde_json::{json, Value};

#[test]
fn get_collection_posts_auth_key_and_parses_result() {
    let server = manifest_server::start(vec![(
        "api/addonCollectionGet",
        Route::json(r#"{"result":{"addons":[{"transportUrl":"http://a/manifest.json"}]}}"#),
    )]);
    let client = CollectionClient::new(server.url("api"), HttpOptions::default());

    let collection = client.get_addon_collection("secret-key").unwrap();
    assert_eq!(
        collection["result"]["addons"][0]["transportUrl"],
        "http://a/manifest.json"
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/addonCollectionGet");
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!({ "type": "AddonCollectionGet", "authKey": "secret-key", "update": true })
    );
}

#[test]
fn get_collection_error_names_method_and_status() {
    let server = manifest_server::start(vec![("api/addonCollectionGet", Route::status(401, ""))]);
    let client = CollectionClient::new(server.url("api/"), HttpOptions::default());

    let err = client.get_addon_collection("bad").unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(err.to_string(), "addonCollectionGet failed (401)");
}

#[test]
fn set_collection_sends_addons() {
    let server = manifest_server::start(vec![(
        "api/addonCollectionSet",
        Route::json(r#"{"result":{"success":true}}"#),
    )]);
    let client = CollectionClient::new(server.url("api"), HttpOptions::default());
    let addons = vec![json!({ "transportUrl": "http://a/manifest.json", "manifest": { "version": "1" } })];

    let response = client.set_addon_collection("k", &addons).unwrap();
    assert_eq!(response["result"]["success"], true);

    let sent: Value = serde_json::from_str(&server.requests()[0].body).unwrap();
    assert_eq!(sent["type"], "AddonCollectionSet");
    assert_eq!(sent["authKey"], "k");
    assert_eq!(sent["addons"], Value::Array(addons));
}

#[test]
fn set_collection_error_uses_body_text() {
    let server = manifest_server::start(vec![(
        "api/addonCollectionSet",
        Route::status(400, "invalid addons"),
    )]);
    let client = CollectionClient::new(server.url("api"), HttpOptions::default());

    let err = client.set_addon_collection("k", &[]).unwrap_err();
    assert_eq!(err.to_string(), "invalid addons");
}
