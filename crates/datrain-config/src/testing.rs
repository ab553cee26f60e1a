//! Test environment abstraction for isolated testing.
//!
//! Provides `TestEnvironment` to manage:
//! - An isolated home directory (with or without a OneDrive folder)
//! - A cache source directory
//! - The env vars a spawned `onedrive-sync` needs to see only those paths
//!
//! # Usage
//!
//! ```ignore
//! use datrain_config::testing::TestEnvironment;
//!
//! let env = TestEnvironment::new().unwrap();
//! // env.home, env.onedrive_dir, env.cache_source are all isolated
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;

use crate::path::{marker_path, onedrive_dir, HOME_ENV};

/// Atomic counter for unique test IDs
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Isolated test environment with unique paths
pub struct TestEnvironment {
    /// Temporary directory (dropped on cleanup)
    _temp_dir: TempDir,
    /// Value handed to the process as its home directory
    pub home: PathBuf,
    /// `<home>/OneDrive` (only created by [`TestEnvironment::new`])
    pub onedrive_dir: PathBuf,
    /// Directory the `cache` command reads from
    pub cache_source: PathBuf,
    /// Working directory for spawned processes
    pub project_root: PathBuf,
    /// Unique test ID
    pub test_id: u32,
}

impl TestEnvironment {
    /// Create an environment whose home already has a OneDrive folder
    pub fn new() -> anyhow::Result<Self> {
        let env = Self::bare()?;
        std::fs::create_dir_all(&env.onedrive_dir)?;
        Ok(env)
    }

    /// Create an environment whose home has no OneDrive folder
    pub fn bare() -> anyhow::Result<Self> {
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        // Spaces in the home path on purpose: joins must survive them.
        let home = root.join(format!("home dir {}", test_id));
        let project_root = root.join("project");
        let cache_source = project_root.join("cache_to_onedrive");

        std::fs::create_dir_all(&home)?;
        std::fs::create_dir_all(&cache_source)?;

        Ok(Self {
            onedrive_dir: onedrive_dir(&home),
            _temp_dir: temp_dir,
            home,
            cache_source,
            project_root,
            test_id,
        })
    }

    /// Where the marker file is expected to land
    pub fn marker_path(&self) -> PathBuf {
        marker_path(&self.home)
    }

    /// Create a file inside the cache source directory
    pub fn create_source_file(&self, relative_path: &str, content: &[u8]) -> anyhow::Result<PathBuf> {
        let path = self.cache_source.join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a project-local config file under `project_root`
    pub fn write_project_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.project_root.join(crate::PROJECT_CONFIG_PATH);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Env vars for spawning `onedrive-sync` against this environment
    pub fn process_env(&self) -> Vec<(String, String)> {
        vec![
            (HOME_ENV.to_string(), self.home.to_string_lossy().into_owned()),
            (
                crate::ENV_CACHE_SOURCE.to_string(),
                self.cache_source.to_string_lossy().into_owned(),
            ),
        ]
    }
}
