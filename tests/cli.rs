use assert_cmd::Command;
use predicates::prelude::*;

fn grantview() -> Command {
    let mut cmd = Command::cargo_bin("grantview").unwrap();
    cmd.env_remove("GRANTVIEW_URL").env_remove("GRANTVIEW_KEY");
    cmd
}

#[test]
fn test_help_lists_options() {
    grantview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--data"))
        .stdout(predicate::str::contains("--export-dir"))
        .stdout(predicate::str::contains("--page-size"));
}

#[test]
fn test_no_data_source_fails() {
    grantview()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no data source"));
}

#[test]
fn test_url_without_key_fails() {
    grantview()
        .args(["--url", "https://example.supabase.co"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing API key"));
}

#[test]
fn test_missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    grantview()
        .arg("--data")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load data file"));
}

#[test]
fn test_malformed_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grants.json");
    std::fs::write(&path, "[{\"fiscal_year\": \"soon\"}]").unwrap();

    grantview()
        .arg("--data")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load data file"));
}

#[test]
fn test_zero_page_size_rejected() {
    grantview()
        .args(["--page-size", "0", "--data", "grants.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--page-size must be at least 1"));
}

#[test]
fn test_data_conflicts_with_url() {
    grantview()
        .args(["--data", "grants.json", "--url", "https://example.supabase.co"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
