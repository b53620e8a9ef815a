//! `addonsync collection pull|push` – move a user's addon collection to and from a catalog file.

use addonsync_core::api::CollectionClient;
use addonsync_core::catalog::Catalog;
use addonsync_core::config::SyncConfig;
use addonsync_core::sync::write_atomic;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Fetch the collection and save it pretty-printed to `out`.
pub async fn run_pull(cfg: &SyncConfig, auth_key: String, out: &Path) -> Result<()> {
    let client = CollectionClient::from_config(cfg);
    let collection = tokio::task::spawn_blocking(move || client.get_addon_collection(&auth_key))
        .await
        .context("collection task")??;

    let pretty = serde_json::to_string_pretty(&collection)?;
    write_atomic(out, pretty.as_bytes()).with_context(|| format!("write {}", out.display()))?;

    match Catalog::parse(out, pretty) {
        Ok(catalog) => println!(
            "Saved {} addon(s) to {}",
            catalog.records().len(),
            out.display()
        ),
        Err(e) => {
            tracing::warn!("pulled collection is not a catalog: {}", e);
            println!("Saved response to {}", out.display());
        }
    }
    Ok(())
}

/// Send the addons of `catalog_path` as the user's collection.
pub async fn run_push(cfg: &SyncConfig, auth_key: String, catalog_path: &Path) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let addons: Vec<Value> = catalog.record_values().into_iter().cloned().collect();
    let count = addons.len();

    let client = CollectionClient::from_config(cfg);
    tokio::task::spawn_blocking(move || client.set_addon_collection(&auth_key, &addons))
        .await
        .context("collection task")??;

    println!("Pushed {} addon(s) from {}", count, catalog_path.display());
    Ok(())
}
