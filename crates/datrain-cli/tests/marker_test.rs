//! Process-level tests for the default marker write.

mod common;

use common::{bare_cmd, onedrive_sync};
use datrain_config::testing::TestEnvironment;
use predicates::prelude::*;
use predicates::str::contains;

const EXPECTED: &str = "This is a DatRain sync test.\n";

#[test]
fn writes_marker_and_exits_zero() {
    let env = TestEnvironment::new().unwrap();

    onedrive_sync(&env)
        .assert()
        .success()
        .stdout(contains("File created in OneDrive folder"));

    assert_eq!(std::fs::read_to_string(env.marker_path()).unwrap(), EXPECTED);
}

#[test]
fn marker_subcommand_matches_default() {
    let env = TestEnvironment::new().unwrap();

    onedrive_sync(&env).arg("marker").assert().success();

    assert_eq!(std::fs::read_to_string(env.marker_path()).unwrap(), EXPECTED);
}

#[test]
fn printed_path_matches_written_path() {
    // TestEnvironment homes contain spaces
    let env = TestEnvironment::new().unwrap();
    let expected_line = format!("Copying file to: {}", env.marker_path().display());

    let output = onedrive_sync(&env).assert().success().get_output().clone();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.lines().any(|l| l == expected_line), "stdout: {}", stdout);
    assert!(env.marker_path().exists());
}

#[test]
fn missing_home_fails_without_writing() {
    bare_cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(contains("required environment variable"))
        .stdout(contains("Copying file to").not());
}

#[test]
fn empty_home_is_treated_as_missing() {
    bare_cmd()
        .env(datrain_config::path::HOME_ENV, "")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("not set"));
}

#[test]
fn missing_onedrive_folder_fails_to_open() {
    let env = TestEnvironment::bare().unwrap();

    onedrive_sync(&env)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Failed to open file in OneDrive folder"));

    assert!(!env.onedrive_dir.exists());
}

#[test]
fn second_run_is_byte_identical() {
    let env = TestEnvironment::new().unwrap();

    onedrive_sync(&env).assert().success();
    let first = std::fs::read(env.marker_path()).unwrap();
    onedrive_sync(&env).assert().success();
    let second = std::fs::read(env.marker_path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, EXPECTED.as_bytes());
}

#[test]
fn overwrites_stale_marker() {
    let env = TestEnvironment::new().unwrap();
    std::fs::write(env.marker_path(), "something else entirely, and longer\n").unwrap();

    onedrive_sync(&env).assert().success();

    assert_eq!(std::fs::read_to_string(env.marker_path()).unwrap(), EXPECTED);
}
