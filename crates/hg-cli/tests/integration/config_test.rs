use predicates::prelude::*;
use tempfile::TempDir;

use crate::support::{config_path, hardgates};

#[test]
fn path_honours_override() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn set_then_show() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .args(["config", "set", "service.url", "http://assess.internal:9000/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set service.url"));
    hardgates(&home)
        .args(["config", "set", "polling.max_attempts", "12"])
        .assert()
        .success();

    hardgates(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("url = \"http://assess.internal:9000\""))
        .stdout(predicate::str::contains("max_attempts = 12"));

    let saved = std::fs::read_to_string(config_path(&home)).unwrap();
    assert!(saved.contains("[service]"));
    assert!(saved.contains("[polling]"));
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    hardgates(&home)
        .args(["config", "set", "service.default_branch", "develop"])
        .assert()
        .success();
    let mode = std::fs::metadata(config_path(&home)).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn show_masks_token() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .args(["config", "set", "service.github_token", "ghp_secret_value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghp_secret_value").not());

    hardgates(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("ghp_secret_value").not());
}

#[test]
fn unset_removes_value() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .args(["config", "set", "polling.interval_secs", "9"])
        .assert()
        .success();
    hardgates(&home)
        .args(["config", "unset", "polling.interval_secs"])
        .assert()
        .success();
    hardgates(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval_secs").not());
}

#[test]
fn rejects_unknown_key_and_bad_values() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .args(["config", "set", "service.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
    hardgates(&home)
        .args(["config", "set", "polling.max_attempts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
    assert!(!config_path(&home).exists());
}

#[test]
fn malformed_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(config_path(&home), "[service\nurl = ").unwrap();
    hardgates(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}
