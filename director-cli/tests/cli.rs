use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn hooks_cmd(charm_dir: &Path, config: &str) -> Command {
    let config_file = charm_dir.join("config.yaml");
    std::fs::write(&config_file, config).unwrap();

    let mut cmd = Command::cargo_bin("pg-dir-hooks").unwrap();
    cmd.env_remove("JUJU_RELATION_ID")
        .arg("--charm-dir")
        .arg(charm_dir)
        .arg("--root")
        .arg(charm_dir.join("rootfs"))
        .arg("--config-file")
        .arg(config_file);
    cmd
}

#[test]
fn test_list_prints_registered_hooks() {
    Command::cargo_bin("pg-dir-hooks")
        .unwrap()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("config-changed\n"))
        .stdout(predicate::str::contains("plumgrid-relation-joined\n"))
        .stdout(predicate::str::contains("upgrade-charm\n"));
}

#[test]
fn test_unknown_hook_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    hooks_cmd(dir.path(), "fabric-interfaces: MANAGEMENT\n")
        .arg("update-status")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown hook"));
    assert!(!dir.path().join(".juju-persistent-config").exists());
}

#[test]
fn test_missing_hook_name_fails() {
    Command::cargo_bin("pg-dir-hooks")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no hook name given"));
}

#[test]
fn test_unassigned_opsvm_saves_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    hooks_cmd(dir.path(), "opsvm-ip: 127.0.0.1\n")
        .arg("plumgrid-relation-joined")
        .assert()
        .success();
    let saved = std::fs::read_to_string(dir.path().join(".juju-persistent-config")).unwrap();
    assert!(saved.contains("127.0.0.1"));
}

#[test]
fn test_invalid_opsvm_fails_without_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    hooks_cmd(dir.path(), "opsvm-ip: not-an-ip\n")
        .arg("plumgrid-relation-joined")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid address"));
    assert!(!dir.path().join(".juju-persistent-config").exists());
}
