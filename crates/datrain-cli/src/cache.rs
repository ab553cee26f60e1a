//! # onedrive-sync cache
//!
//! Copies the top-level regular files of a source directory into the
//! OneDrive folder. Subdirectories and symlinks are left alone.
//! A failed copy is reported and counted; the remaining files still go.

use std::path::{Path, PathBuf};

use datrain_config::path::{home_dir, onedrive_dir};
use datrain_config::{log_cache_debug, log_cache_info, log_cache_warn, ConfigError};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(
        "Could not locate OneDrive folder at {}. Is OneDrive installed and set up?",
        path.display()
    )]
    OneDriveMissing { path: PathBuf },
    #[error(
        "Source directory '{}' does not exist. Place files to sync to OneDrive here.",
        path.display()
    )]
    SourceMissing { path: PathBuf },
    #[error("Source path '{}' is not a directory.", path.display())]
    SourceNotDirectory { path: PathBuf },
}

/// Outcome of one cache run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheReport {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Resolve the OneDrive folder from the environment and copy `source` into it.
pub fn run(source: &Path) -> Result<CacheReport, CacheError> {
    let home = home_dir()?;
    let onedrive = onedrive_dir(&home);
    if !onedrive.is_dir() {
        return Err(CacheError::OneDriveMissing { path: onedrive });
    }

    let report = cache_to_onedrive(source, &onedrive)?;
    println!(
        "Sync to OneDrive requested. OneDrive client will upload files automatically if running."
    );
    Ok(report)
}

/// Copy every regular file directly inside `source` into `onedrive`.
///
/// Existing files with the same name are overwritten.
pub fn cache_to_onedrive(source: &Path, onedrive: &Path) -> Result<CacheReport, CacheError> {
    if !source.exists() {
        return Err(CacheError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(CacheError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    let mut report = CacheReport::default();

    for entry in WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log_cache_warn!("Unreadable entry", error = tracing::field::display(&e));
                eprintln!("Failed to read entry in {}: {}", source.display(), e);
                report.failed += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            log_cache_debug!(
                "Skipping non-file entry",
                path = tracing::field::display(entry.path().display())
            );
            report.skipped += 1;
            continue;
        }

        let dest = onedrive.join(entry.file_name());
        match std::fs::copy(entry.path(), &dest) {
            Ok(bytes) => {
                log_cache_info!(
                    "Copied",
                    path = tracing::field::display(dest.display()),
                    bytes = bytes
                );
                println!("Copied {} to {}", entry.path().display(), dest.display());
                report.copied += 1;
            }
            Err(e) => {
                log_cache_warn!(
                    "Copy failed",
                    path = tracing::field::display(entry.path().display()),
                    error = tracing::field::display(&e)
                );
                eprintln!("Failed to copy {}: {}", entry.path().display(), e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
