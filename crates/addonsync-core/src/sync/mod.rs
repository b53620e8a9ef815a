//! Addon manifest synchronizer.
//!
//! For one catalog file: load it, fetch each addon's published manifest in
//! turn, compare versions, and, if anything changed, write a dated backup of
//! the original document followed by the updated catalog.
//!
//! Per-catalog progression: loaded, compared record by record, then either
//! left untouched (nothing changed) or backed up and rewritten. A read,
//! parse, shape, or write failure aborts that catalog only.

mod persist;
mod run;

pub use persist::{backup_path, write_atomic};
pub use run::sync_all;

use chrono::NaiveDate;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError};
use crate::config::{SyncConfig, UpdatePolicy};
use crate::fetch::{FailureKind, ManifestFetcher};
use crate::patch;

/// What happened to one addon record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    UpToDate {
        name: String,
    },
    Updated {
        name: String,
        from: Option<String>,
        to: String,
    },
    /// Record has no usable `transportUrl`.
    NoTransportUrl {
        name: String,
    },
    /// Local addon source refused the connection; expected when it isn't running.
    LocalSourceOffline {
        name: String,
    },
    FetchFailed {
        name: String,
        error: String,
    },
}

impl RecordStatus {
    pub fn name(&self) -> &str {
        match self {
            RecordStatus::UpToDate { name }
            | RecordStatus::Updated { name, .. }
            | RecordStatus::NoTransportUrl { name }
            | RecordStatus::LocalSourceOffline { name }
            | RecordStatus::FetchFailed { name, .. } => name,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, RecordStatus::Updated { .. })
    }
}

/// Terminal state of one catalog.
#[derive(Debug)]
pub enum CatalogOutcome {
    /// No record changed; nothing was written.
    UpToDate,
    /// Backup and catalog were written.
    Updated { changed: usize, backup: PathBuf },
    Aborted(CatalogError),
}

#[derive(Debug)]
pub struct CatalogReport {
    pub path: PathBuf,
    pub records: Vec<RecordStatus>,
    pub outcome: CatalogOutcome,
}

impl CatalogReport {
    fn aborted(path: &Path, records: Vec<RecordStatus>, err: CatalogError) -> Self {
        tracing::error!(catalog = %path.display(), kind = err.kind(), "{}", err);
        Self {
            path: path.to_path_buf(),
            records,
            outcome: CatalogOutcome::Aborted(err),
        }
    }
}

/// Shared, read-only settings for a run: fetcher, persistence policy and the
/// date used for backup names (fixed once so every catalog agrees).
#[derive(Debug, Clone)]
pub struct Synchronizer {
    fetcher: ManifestFetcher,
    policy: UpdatePolicy,
    date: NaiveDate,
}

impl Synchronizer {
    pub fn new(fetcher: ManifestFetcher, policy: UpdatePolicy) -> Self {
        Self {
            fetcher,
            policy,
            date: chrono::Local::now().date_naive(),
        }
    }

    pub fn from_config(cfg: &SyncConfig) -> Self {
        Self::new(ManifestFetcher::from_config(cfg), cfg.policy)
    }

    /// Override the backup date (tests, reproducible runs).
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Sync one catalog file. Never fails as a whole; problems are in the report.
    pub async fn sync_catalog(&self, path: &Path) -> CatalogReport {
        tracing::info!(catalog = %path.display(), policy = ?self.policy, "updating file");

        let owned = path.to_path_buf();
        let loaded = tokio::task::spawn_blocking(move || Catalog::load(&owned))
            .await
            .unwrap_or_else(|e| {
                Err(CatalogError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::other(e.to_string()),
                })
            });
        let catalog = match loaded {
            Ok(c) => c,
            Err(e) => return CatalogReport::aborted(path, Vec::new(), e),
        };

        let mut text = catalog.raw().to_string();
        let mut replacements: Vec<(usize, Value)> = Vec::new();
        let mut statuses = Vec::new();

        for record in catalog.records() {
            let name = record.label().to_string();
            let Some(url) = record.transport_url.as_deref() else {
                tracing::info!(addon = %name, "skipping addon without transportUrl");
                statuses.push(RecordStatus::NoTransportUrl { name });
                continue;
            };

            let remote = match self.fetcher.fetch(url).await {
                Ok(remote) => remote,
                Err(err) => {
                    match self.fetcher.classify(url, &err) {
                        FailureKind::LocalSourceOffline => {
                            tracing::debug!(addon = %name, url, "local addon source offline");
                            statuses.push(RecordStatus::LocalSourceOffline { name });
                        }
                        FailureKind::Reported => {
                            tracing::error!(addon = %name, url, error = %err, "failed to fetch manifest");
                            statuses.push(RecordStatus::FetchFailed {
                                name,
                                error: err.to_string(),
                            });
                        }
                    }
                    continue;
                }
            };

            let remote_version = remote
                .get("version")
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            let Some(to) = remote_version.filter(|v| record.version.as_deref() != Some(v.as_str()))
            else {
                tracing::info!(addon = %name, catalog = %path.display(), "up to date");
                statuses.push(RecordStatus::UpToDate { name });
                continue;
            };

            tracing::info!(addon = %name, from = ?record.version, to = %to, "updating addon");
            match self.policy {
                UpdatePolicy::Patch => text = patch::patch_version(&text, url, &to),
                UpdatePolicy::Replace => replacements.push((record.index, remote)),
            }
            statuses.push(RecordStatus::Updated {
                name,
                from: record.version.clone(),
                to,
            });
        }

        let changed = statuses.iter().filter(|s| s.is_updated()).count();
        if changed == 0 {
            return CatalogReport {
                path: path.to_path_buf(),
                records: statuses,
                outcome: CatalogOutcome::UpToDate,
            };
        }

        let (policy, date) = (self.policy, self.date);
        let persisted =
            tokio::task::spawn_blocking(move || persist(policy, date, catalog, text, replacements))
                .await
                .unwrap_or_else(|e| {
                    Err(CatalogError::Persist {
                        path: path.to_path_buf(),
                        source: std::io::Error::other(e.to_string()),
                    })
                });
        match persisted {
            Ok(backup) => {
                tracing::info!(
                    catalog = %path.display(),
                    backup = %backup.display(),
                    changed,
                    "addons updated"
                );
                CatalogReport {
                    path: path.to_path_buf(),
                    records: statuses,
                    outcome: CatalogOutcome::Updated { changed, backup },
                }
            }
            Err(e) => CatalogReport::aborted(path, statuses, e),
        }
    }
}

/// Write the backup (document as loaded, pretty-printed), then the catalog.
fn persist(
    policy: UpdatePolicy,
    date: NaiveDate,
    mut catalog: Catalog,
    patched_text: String,
    replacements: Vec<(usize, Value)>,
) -> Result<PathBuf, CatalogError> {
    let path = catalog.path().to_path_buf();
    let backup = backup_path(&path, date);
    let persist_err = |p: &Path| {
        let p = p.to_path_buf();
        move |source: std::io::Error| CatalogError::Persist { path: p, source }
    };

    let snapshot = catalog
        .to_pretty_json()
        .map_err(std::io::Error::from)
        .map_err(persist_err(&backup))?;
    write_atomic(&backup, snapshot.as_bytes()).map_err(persist_err(&backup))?;
    tracing::debug!(backup = %backup.display(), "backup written");

    let contents = match policy {
        UpdatePolicy::Patch => patched_text,
        UpdatePolicy::Replace => {
            for (index, manifest) in replacements {
                catalog.replace_manifest(index, manifest);
            }
            catalog
                .to_pretty_json()
                .map_err(std::io::Error::from)
                .map_err(persist_err(&path))?
        }
    };
    write_atomic(&path, contents.as_bytes()).map_err(persist_err(&path))?;
    tracing::debug!(catalog = %path.display(), "catalog written");
    Ok(backup)
}
