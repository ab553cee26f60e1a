//! # Marker write
//!
//! Drops a fixed-content marker file into the local OneDrive folder. The
//! OneDrive client, running on its own, notices the file and uploads it.
//! Nothing here talks to OneDrive or checks that the upload happened.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use datrain_config::path::{home_dir, marker_path};
use datrain_config::{log_marker_debug, log_marker_error, log_marker_info, ConfigError};

/// Exact bytes written to the marker file
pub const MARKER_CONTENT: &str = "This is a DatRain sync test.\n";

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("Failed to open file in OneDrive folder: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write file in OneDrive folder: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve the home directory from the environment and write the marker.
///
/// Returns the path that was written.
pub fn run() -> Result<PathBuf, SyncError> {
    let home = home_dir()?;
    run_in(&home)
}

/// Write the marker under an already-resolved home directory.
///
/// The destination is printed before anything touches the disk, so the
/// printed path is always the one attempted.
pub fn run_in(home: &Path) -> Result<PathBuf, SyncError> {
    let dest = marker_path(home);
    println!("Copying file to: {}", dest.display());

    if let Err(e) = write_marker(&dest) {
        log_marker_error!("Marker write failed", path = tracing::field::display(dest.display()));
        return Err(e);
    }

    log_marker_info!("Marker written", path = tracing::field::display(dest.display()));
    println!("File created in OneDrive folder. It should sync automatically.");
    Ok(dest)
}

/// Create or truncate `path` and write [`MARKER_CONTENT`] into it.
///
/// Parent directories are never created: a missing OneDrive folder is an
/// open failure.
pub fn write_marker(path: &Path) -> Result<(), SyncError> {
    log_marker_debug!("Opening marker", path = tracing::field::display(path.display()));
    let file = File::create(path).map_err(|source| SyncError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source: io::Error| SyncError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    writer
        .write_all(MARKER_CONTENT.as_bytes())
        .map_err(write_err)?;
    let file = writer
        .into_inner()
        .map_err(|e| write_err(e.into_error()))?;
    file.sync_all().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_marker_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("marker.txt");

        write_marker(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "This is a DatRain sync test.\n"
        );
    }

    #[test]
    fn test_write_marker_truncates_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("marker.txt");
        std::fs::write(&path, "stale content that is much longer than the marker line\n").unwrap();

        write_marker(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), MARKER_CONTENT);
    }

    #[test]
    fn test_write_marker_missing_parent_is_open_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("OneDrive").join("marker.txt");

        let err = write_marker(&path).unwrap_err();

        assert!(matches!(err, SyncError::Open { .. }));
        assert!(err.to_string().starts_with("Failed to open file in OneDrive folder"));
        assert!(!temp.path().join("OneDrive").exists());
    }

    #[test]
    fn test_run_in_writes_under_onedrive() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("OneDrive")).unwrap();

        let written = run_in(temp.path()).unwrap();

        assert_eq!(written, temp.path().join("OneDrive/DatRainCacheTest.txt"));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), MARKER_CONTENT);
    }

    #[test]
    fn test_run_in_is_idempotent() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("OneDrive")).unwrap();

        let first = run_in(temp.path()).unwrap();
        let first_bytes = std::fs::read(&first).unwrap();
        let second = run_in(temp.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, std::fs::read(&second).unwrap());
    }
}
