//! End-to-end tests driving the skiff binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY: &str = "11111111111111111111111111111111";

fn skiff(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("skiff").unwrap();
    cmd.arg("--config-dir").arg(config_dir.path());
    cmd.env_remove("SKIFF_ENCRYPT_KEY");
    cmd
}

#[test]
fn pipe_copies_stdin_to_stdout() {
    let config = TempDir::new().unwrap();
    skiff(&config)
        .arg("pipe")
        .write_stdin("hello world")
        .assert()
        .success()
        .stdout("hello world");
}

#[test]
fn pipe_writes_file_target() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let target = data.path().join("obj.txt");

    skiff(&config)
        .arg("pipe")
        .arg(target.to_str().unwrap())
        .write_stdin("payload")
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(target).unwrap(), "payload");
}

#[test]
fn pipe_writes_alias_rooted_target() {
    let config = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    skiff(&config)
        .args(["alias", "set", "store"])
        .arg(format!("file://{}", root.path().display()))
        .assert()
        .success();

    skiff(&config)
        .args(["pipe", "store/bucket/obj.txt"])
        .write_stdin("via alias")
        .assert()
        .success();

    let written = root.path().join("bucket/obj.txt");
    assert_eq!(std::fs::read_to_string(written).unwrap(), "via alias");
}

#[test]
fn pipe_rejects_malformed_key_spec() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    skiff(&config)
        .args(["pipe", data.path().join("obj").to_str().unwrap()])
        .args(["--encrypt-key", "s3/bucket"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("alias/prefix=key"));
}

#[test]
fn pipe_rejects_short_key() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    skiff(&config)
        .args(["pipe", data.path().join("obj").to_str().unwrap()])
        .args(["--encrypt-key", "s3/bucket=short"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 32 bytes"));
}

#[test]
fn encrypt_key_flag_overrides_environment() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let target = data.path().join("obj");

    // The malformed env spec alone fails the command.
    let mut cmd = Command::cargo_bin("skiff").unwrap();
    cmd.arg("--config-dir")
        .arg(config.path())
        .env("SKIFF_ENCRYPT_KEY", "malformed")
        .args(["pipe", target.to_str().unwrap()])
        .write_stdin("x")
        .assert()
        .failure();

    // A valid flag value wins over the malformed environment value.
    let mut cmd = Command::cargo_bin("skiff").unwrap();
    cmd.arg("--config-dir")
        .arg(config.path())
        .env("SKIFF_ENCRYPT_KEY", "malformed")
        .args(["pipe", target.to_str().unwrap()])
        .args(["--encrypt-key", &format!("s3/bucket={KEY}")])
        .write_stdin("x")
        .assert()
        .success();
}

#[test]
fn stat_reports_object_json() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let target = data.path().join("obj.txt");
    std::fs::write(&target, "12345").unwrap();

    let output = skiff(&config)
        .args(["--json", "stat", target.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let info: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(info["size"], 5);
    assert_eq!(info["is_dir"], false);
    assert_eq!(info["key"], target.to_str().unwrap());
}

#[test]
fn stat_recursive_lists_folder_contents() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    std::fs::write(data.path().join("a.txt"), "a").unwrap();
    std::fs::create_dir(data.path().join("sub")).unwrap();
    std::fs::write(data.path().join("sub/b.txt"), "bb").unwrap();

    skiff(&config)
        .args(["stat", "--recursive", data.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt").and(predicate::str::contains("sub/b.txt")));
}

#[test]
fn stat_missing_target_fails() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    skiff(&config)
        .args(["stat", data.path().join("gone").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target not found"));
}

#[test]
fn stat_accepts_valid_key_spec() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let target = data.path().join("obj.txt");
    std::fs::write(&target, "x").unwrap();

    skiff(&config)
        .args(["stat", target.to_str().unwrap()])
        .args(["--encrypt-key", &format!("{}={KEY}", target.display())])
        .assert()
        .success();
}

#[test]
fn alias_set_and_list_roundtrip() {
    let config = TempDir::new().unwrap();

    skiff(&config)
        .args(["alias", "set", "store", "file:///srv/objects"])
        .assert()
        .success();

    let output = skiff(&config)
        .args(["--json", "alias", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let aliases: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(aliases["store"]["url"], "file:///srv/objects");
}

#[test]
fn alias_set_rejects_unknown_scheme() {
    let config = TempDir::new().unwrap();
    skiff(&config)
        .args(["alias", "set", "store", "ftp://example.test"])
        .assert()
        .failure();
}

#[test]
fn alias_rm_missing_fails() {
    let config = TempDir::new().unwrap();
    skiff(&config)
        .args(["alias", "rm", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alias not found"));
}

#[test]
fn share_upload_declined_for_filesystem_target() {
    let config = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let target = data.path().join("obj.txt");
    std::fs::write(&target, "x").unwrap();

    skiff(&config)
        .args(["share", "upload", target.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to share"));
}

#[test]
fn share_upload_prefix_requires_recursive() {
    let config = TempDir::new().unwrap();

    skiff(&config)
        .args(["share", "upload", "store/bucket/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--recursive"));
}

#[test]
fn share_upload_rejects_oversized_expiry() {
    let config = TempDir::new().unwrap();

    skiff(&config)
        .args(["share", "upload", "store/obj", "--expire", "8d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("7 days"));
}
