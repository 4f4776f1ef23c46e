use predicates::prelude::*;
use tempfile::TempDir;

use crate::support::hardgates;

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("gates"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hardgates"));
}

#[test]
fn gates_lists_the_whole_catalog() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .arg("gates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logs Are Searchable And Available"))
        .stdout(predicate::str::contains("Retry Logic"))
        .stdout(predicate::str::contains("Automated Regression Testing"))
        .stdout(predicate::str::contains("Error Handling"))
        .stdout(predicate::str::contains("15 gates"));
}

#[test]
fn unknown_command_fails() {
    let home = TempDir::new().unwrap();
    hardgates(&home)
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
