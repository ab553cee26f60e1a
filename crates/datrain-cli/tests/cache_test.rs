//! Process-level tests for `onedrive-sync cache`.

mod common;

use common::onedrive_sync;
use datrain_config::testing::TestEnvironment;
use predicates::str::contains;

#[test]
fn copies_source_files_into_onedrive() {
    let env = TestEnvironment::new().unwrap();
    env.create_source_file("report.txt", b"quarterly").unwrap();
    env.create_source_file("photo.jpg", b"\xff\xd8\xff").unwrap();
    env.create_source_file("nested/ignored.txt", b"nope").unwrap();

    onedrive_sync(&env)
        .arg("cache")
        .assert()
        .success()
        .stdout(contains("2 copied, 1 skipped, 0 failed"))
        .stdout(contains("Sync to OneDrive requested"));

    assert_eq!(
        std::fs::read(env.onedrive_dir.join("report.txt")).unwrap(),
        b"quarterly"
    );
    assert_eq!(
        std::fs::read(env.onedrive_dir.join("photo.jpg")).unwrap(),
        b"\xff\xd8\xff"
    );
    assert!(!env.onedrive_dir.join("ignored.txt").exists());
    assert!(!env.onedrive_dir.join("nested").exists());
}

#[test]
fn explicit_source_argument_wins() {
    let env = TestEnvironment::new().unwrap();
    let other = env.project_root.join("elsewhere");
    std::fs::create_dir_all(&other).unwrap();
    std::fs::write(other.join("only-here.txt"), b"x").unwrap();
    env.create_source_file("from-config.txt", b"y").unwrap();

    onedrive_sync(&env).arg("cache").arg(&other).assert().success();

    assert!(env.onedrive_dir.join("only-here.txt").exists());
    assert!(!env.onedrive_dir.join("from-config.txt").exists());
}

#[test]
fn missing_source_fails() {
    let env = TestEnvironment::new().unwrap();

    onedrive_sync(&env)
        .arg("cache")
        .arg(env.project_root.join("does-not-exist"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("does not exist"));

    assert_eq!(std::fs::read_dir(&env.onedrive_dir).unwrap().count(), 0);
}

#[test]
fn missing_onedrive_folder_fails() {
    let env = TestEnvironment::bare().unwrap();
    env.create_source_file("report.txt", b"quarterly").unwrap();

    onedrive_sync(&env)
        .arg("cache")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Could not locate OneDrive folder"));

    assert!(!env.onedrive_dir.exists());
}
