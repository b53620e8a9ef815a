//! `addonsync update` – sync every enabled catalog in the update list.

use addonsync_core::config::{SyncConfig, UpdatePolicy};
use addonsync_core::sync::{self, CatalogOutcome, CatalogReport, RecordStatus, Synchronizer};
use addonsync_core::update_list;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// One console line per record; `None` for records that stay silent.
pub(crate) fn format_record(status: &RecordStatus, catalog: &str) -> Option<String> {
    match status {
        RecordStatus::UpToDate { name } => Some(format!("  {} is up to date in {}", name, catalog)),
        RecordStatus::Updated { name, from, to } => Some(format!(
            "  Updating {} from version {} to {}",
            name,
            from.as_deref().unwrap_or("(none)"),
            to
        )),
        RecordStatus::NoTransportUrl { name } => {
            Some(format!("  Skipping {} because it has no transportUrl.", name))
        }
        RecordStatus::LocalSourceOffline { .. } => None,
        RecordStatus::FetchFailed { name, error } => {
            Some(format!("  Failed to fetch manifest for {}: {}", name, error))
        }
    }
}

fn print_report(report: &CatalogReport) {
    let catalog = report
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.path.display().to_string());
    println!("Updating file: {}", report.path.display());
    for status in &report.records {
        if let Some(line) = format_record(status, &catalog) {
            println!("{}", line);
        }
    }
    match &report.outcome {
        CatalogOutcome::UpToDate => {}
        CatalogOutcome::Updated { changed, backup } => {
            let backup_name = backup
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!(
                "Addons updated successfully ({} changed). Backup saved as {}",
                changed, backup_name
            );
        }
        CatalogOutcome::Aborted(err) => eprintln!("  {}", err),
    }
}

/// Sync the catalogs named by the update list. Only an unreadable list fails the command;
/// per-catalog and per-addon problems are printed and logged.
pub async fn run_update(
    cfg: &SyncConfig,
    list: Option<&Path>,
    policy: Option<UpdatePolicy>,
) -> Result<()> {
    let list_path = list.unwrap_or(cfg.list_file.as_path());
    let files = update_list::load_update_list(list_path)?;
    if files.is_empty() {
        println!("No enabled catalogs in {}.", list_path.display());
        return Ok(());
    }

    let mut cfg = cfg.clone();
    if let Some(policy) = policy {
        cfg.policy = policy;
    }
    let synchronizer = Arc::new(Synchronizer::from_config(&cfg));
    let reports = sync::sync_all(synchronizer, files).await;

    for report in &reports {
        print_report(report);
    }
    let updated = reports
        .iter()
        .filter(|r| matches!(r.outcome, CatalogOutcome::Updated { .. }))
        .count();
    tracing::info!(catalogs = reports.len(), updated, "update run completed");
    Ok(())
}
