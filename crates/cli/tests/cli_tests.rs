//! CLI integration tests
use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("sitelens").unwrap()
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyze web page structure"));
}

#[test]
fn test_cli_help_lists_kebab_case_flags() {
    // Flag spellings must stay kebab-case so the generated shell
    // completions keep advertising flags the binary actually accepts.
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--probe-timeout"))
        .stdout(predicate::str::contains("--user-agent"))
        .stdout(predicate::str::contains("--cache-dir"));
}

#[test]
fn test_cli_accepts_probe_flags() {
    // The flags parse; the run still fails on the unreachable URL check
    // long before any network activity.
    cmd()
        .args([
            "--probe-timeout",
            "5",
            "--user-agent",
            "test-agent",
            "not-a-url",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success();
}

#[test]
fn test_cli_requires_url() {
    cmd().assert().failure();
}

#[test]
fn test_cli_rejects_invalid_url() {
    cmd()
        .arg("not-a-url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_rejects_non_http_scheme() {
    cmd()
        .arg("ftp://example.com/file.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_rejects_undotted_host() {
    cmd().arg("http://localhost").assert().failure();
}

#[test]
fn test_cli_rejects_unknown_format() {
    cmd()
        .args(["-f", "yaml", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_verbose_banner() {
    cmd()
        .args(["-v", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sitelens"));
}
