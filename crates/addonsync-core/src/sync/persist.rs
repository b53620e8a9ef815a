//! Backup naming and atomic file replacement.

use chrono::NaiveDate;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Mode for files that do not exist yet; the process umask still applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Backup path for `catalog` on `date`: `<dir>/<stem>-<YYYY.MM.DD>.json`.
/// Only a trailing `.json` is stripped from the file name.
pub fn backup_path(catalog: &Path, date: NaiveDate) -> PathBuf {
    let file_name = catalog
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string());
    let stem = file_name.strip_suffix(".json").unwrap_or(&file_name);
    let name = format!("{}-{}.json", stem, date.format("%Y.%m.%d"));
    catalog.with_file_name(name)
}

#[cfg(unix)]
fn new_file_permissions(builder: &mut tempfile::Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
}

#[cfg(not(unix))]
fn new_file_permissions(_builder: &mut tempfile::Builder<'_, '_>) {}

/// Write `contents` to a temp file next to `path`, then rename it over `path`.
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    // Temp files default to 0600. A replaced file keeps its mode; a new one
    // gets the usual 0644 (less umask).
    let mut builder = tempfile::Builder::new();
    if existing.is_none() {
        new_file_permissions(&mut builder);
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    if let Some(perms) = existing {
        std::fs::set_permissions(tmp.path(), perms)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
