use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("repoharvest");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repoharvest"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("repoharvest");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_completion_bash() {
    let mut cmd = cargo_bin_cmd!("repoharvest");
    cmd.arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("repoharvest"));
}

#[test]
fn test_status_missing_store_reports_unset_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("repoharvest");
    cmd.current_dir(dir.path())
        .arg("status")
        .arg("--file")
        .arg("absent.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("unset"));
}

#[test]
fn test_status_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("repos.csv");
    std::fs::write(&store, "id,name\n5,a\n12,b\n3,c\n").unwrap();

    let output = cargo_bin_cmd!("repoharvest")
        .current_dir(dir.path())
        .arg("status")
        .arg("--file")
        .arg(&store)
        .arg("--output")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON status");
    assert_eq!(json["records"], 3);
    assert_eq!(json["checkpoint"], 12);
}

#[test]
fn test_status_fails_on_unreadable_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("repos.csv");
    std::fs::write(&store, "id,name\nnot-a-number,broken\n").unwrap();

    let mut cmd = cargo_bin_cmd!("repoharvest");
    cmd.current_dir(dir.path())
        .arg("status")
        .arg("--file")
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("checkpoint"));
}
