//! Run the synchronizer over many catalogs concurrently.
//!
//! One task per catalog file; records inside a file stay sequential. The
//! call returns only after every task has settled.

use std::path::PathBuf;
use std::sync::Arc;

use super::{CatalogReport, Synchronizer};

/// Sync every catalog in `paths`. Reports come back in input order; a task
/// that panics is logged and has no report.
pub async fn sync_all(sync: Arc<Synchronizer>, paths: Vec<PathBuf>) -> Vec<CatalogReport> {
    let mut join_set = tokio::task::JoinSet::new();
    for (i, path) in paths.into_iter().enumerate() {
        let sync = Arc::clone(&sync);
        join_set.spawn(async move { (i, sync.sync_catalog(&path).await) });
    }

    let mut reports = Vec::with_capacity(join_set.len());
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(indexed) => reports.push(indexed),
            Err(e) => tracing::error!("catalog task join: {}", e),
        }
    }
    reports.sort_by_key(|(i, _)| *i);
    reports.into_iter().map(|(_, r)| r).collect()
}
