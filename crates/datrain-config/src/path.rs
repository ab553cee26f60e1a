//! Home directory and OneDrive folder resolution.
//!
//! The home directory comes from a single platform-convention variable:
//! `USERPROFILE` on Windows, `HOME` everywhere else. Every other location is
//! joined onto it with [`Path::join`], so paths with spaces or non-ASCII
//! components need no special handling.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Environment variable holding the user's home/profile directory
#[cfg(windows)]
pub const HOME_ENV: &str = "USERPROFILE";
/// Environment variable holding the user's home/profile directory
#[cfg(not(windows))]
pub const HOME_ENV: &str = "HOME";

/// Default OneDrive Personal folder name under the home directory
pub const ONEDRIVE_FOLDER: &str = "OneDrive";

/// File name of the sync marker
pub const MARKER_FILE_NAME: &str = "DatRainCacheTest.txt";

/// Resolve the home directory from the process environment.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    home_dir_from(std::env::var_os(HOME_ENV))
}

/// Resolve the home directory from an already-read variable value.
///
/// Unset and empty values are both treated as missing.
pub fn home_dir_from(value: Option<OsString>) -> Result<PathBuf, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(PathBuf::from(v)),
        _ => Err(ConfigError::MissingEnv { var: HOME_ENV }),
    }
}

/// `<home>/OneDrive`. Existence is not checked.
pub fn onedrive_dir(home: impl AsRef<Path>) -> PathBuf {
    home.as_ref().join(ONEDRIVE_FOLDER)
}

/// `<home>/OneDrive/DatRainCacheTest.txt`. Existence is not checked.
pub fn marker_path(home: impl AsRef<Path>) -> PathBuf {
    onedrive_dir(home).join(MARKER_FILE_NAME)
}

/// Return the OneDrive folder only if it exists and is a directory.
pub fn locate_onedrive_dir(home: impl AsRef<Path>) -> Option<PathBuf> {
    let candidate = onedrive_dir(home);
    candidate.is_dir().then_some(candidate)
}

/// Compute relative path from base to target.
///
/// Returns the target unchanged when it does not live under `base`.
pub fn compute_relative_path(base: impl AsRef<Path>, target: impl AsRef<Path>) -> PathBuf {
    let target = target.as_ref();
    match target.strip_prefix(base.as_ref()) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => target.to_path_buf(),
    }
}
