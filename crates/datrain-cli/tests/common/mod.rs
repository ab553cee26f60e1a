#![allow(dead_code)]

use assert_cmd::Command;
use datrain_config::path::HOME_ENV;
use datrain_config::testing::TestEnvironment;

/// Env vars from the developer's shell that would leak into a run
const SCRUBBED: &[&str] = &[
    "DATRAIN_LOG",
    "DATRAIN_CACHE_SOURCE",
    "RUST_LOG",
];

/// `onedrive-sync` with no inherited home, running inside `env`
pub fn onedrive_sync(env: &TestEnvironment) -> Command {
    let mut cmd = bare_cmd();
    cmd.envs(env.process_env()).current_dir(&env.project_root);
    cmd
}

/// `onedrive-sync` with the home variable removed
pub fn bare_cmd() -> Command {
    let mut cmd = Command::cargo_bin("onedrive-sync").unwrap();
    cmd.env_remove(HOME_ENV);
    for var in SCRUBBED {
        cmd.env_remove(var);
    }
    cmd
}
