// domain-scout/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DS_VARS: [&str; 11] = [
    "DS_EXTENSIONS",
    "DS_SETTLE",
    "DS_DELAY",
    "DS_TIMEOUT",
    "DS_ENGINE",
    "DS_HEADLESS",
    "DS_SEARCH_URL",
    "DS_OUTPUT",
    "DS_FORMAT",
    "DS_FILE",
    "DS_CONFIG",
];

/// Command isolated from the caller's config files and environment.
fn scout(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("domain-scout").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    for var in DS_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Registrar stub: `.com` is registered, `.org` is offered.
async fn mock_registrar() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><p>example.com is already registered</p></body></html>",
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><div class=\"domain-result\">example.org is available</div></body></html>",
        ))
        .mount(&server)
        .await;

    server
}

fn http_args(server: &MockServer) -> Vec<String> {
    vec![
        "--engine".to_string(),
        "http".to_string(),
        "--search-url".to_string(),
        format!("{}/search?q={{domain}}", server.uri()),
        "--settle".to_string(),
        "0".to_string(),
        "--delay".to_string(),
        "0".to_string(),
    ]
}

fn workdir() -> TempDir {
    tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_help_shows_flags() {
    let dir = workdir();
    scout(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ext"))
        .stdout(predicate::str::contains("--all-extensions"))
        .stdout(predicate::str::contains("--engine"))
        .stdout(predicate::str::contains("--only"));
}

#[test]
fn test_conflicting_extension_flags() {
    let dir = workdir();
    scout(dir.path())
        .args(["example", "-e", "com", "--all-extensions"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot use both"));
}

#[test]
fn test_unsupported_extension_rejected() {
    let dir = workdir();
    scout(dir.path())
        .args(["example", "-e", "io", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported extension"));
}

#[test]
fn test_dry_run_plans_pairs_in_order() {
    let dir = workdir();
    scout(dir.path())
        .args(["Example.com", "test", "example", "-e", "ai,com", "--dry-run"])
        .assert()
        .success()
        .stdout("example.com\nexample.ai\ntest.com\ntest.ai\n")
        .stderr(predicate::str::contains("4 checks would be run"));
}

#[test]
fn test_invalid_names_are_skipped() {
    let dir = workdir();
    scout(dir.path())
        .args(["bad-", "good", "-e", "dev", "--dry-run"])
        .assert()
        .success()
        .stdout("good.dev\n")
        .stderr(predicate::str::contains("Skipping 1 invalid input"));
}

#[test]
fn test_only_invalid_names_fails() {
    let dir = workdir();
    scout(dir.path())
        .args(["has space", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid domain names"));
}

#[test]
fn test_names_from_file() {
    let dir = workdir();
    let list = dir.path().join("ideas.txt");
    fs::write(&list, "# shortlist\nalpha\nbeta # maybe\n").unwrap();

    scout(dir.path())
        .args(["--file", list.to_str().unwrap(), "-e", "org", "--dry-run"])
        .assert()
        .success()
        .stdout("alpha.org\nbeta.org\n");
}

#[test]
fn test_domains_txt_fallback() {
    let dir = workdir();
    fs::write(dir.path().join("domains.txt"), "gamma\n").unwrap();

    scout(dir.path())
        .args(["-e", "com", "--dry-run"])
        .assert()
        .success()
        .stdout("gamma.com\n");
}

#[test]
fn test_names_from_piped_stdin() {
    let dir = workdir();
    scout(dir.path())
        .args(["-e", "ai", "--dry-run"])
        .write_stdin("delta\n\nepsilon\n")
        .assert()
        .success()
        .stdout("delta.ai\nepsilon.ai\n");
}

#[test]
fn test_config_file_extensions() {
    let dir = workdir();
    let config = dir.path().join("scout.toml");
    fs::write(&config, "[defaults]\nextensions = [\"dev\", \"com\"]\n").unwrap();

    scout(dir.path())
        .args(["example", "--config", config.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout("example.com\nexample.dev\n");
}

#[test]
fn test_local_config_is_discovered() {
    let dir = workdir();
    fs::write(
        dir.path().join("domain-scout.toml"),
        "[defaults]\nextensions = [\"org\"]\n",
    )
    .unwrap();

    scout(dir.path())
        .args(["example", "--dry-run"])
        .assert()
        .success()
        .stdout("example.org\n");
}

#[test]
fn test_env_overrides_config_file() {
    let dir = workdir();
    fs::write(
        dir.path().join("domain-scout.toml"),
        "[defaults]\nextensions = [\"org\"]\n",
    )
    .unwrap();

    scout(dir.path())
        .env("DS_EXTENSIONS", "ai")
        .args(["example", "--dry-run"])
        .assert()
        .success()
        .stdout("example.ai\n");
}

#[test]
fn test_missing_config_file_fails() {
    let dir = workdir();
    scout(dir.path())
        .args(["example", "--config", "nope.toml", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_engine_end_to_end() {
    let server = mock_registrar().await;
    let dir = workdir();

    scout(dir.path())
        .args(["example", "-e", "com,org"])
        .args(http_args(&server))
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2]"))
        .stdout(predicate::str::contains("TAKEN"))
        .stdout(predicate::str::contains("AVAILABLE"))
        .stdout(predicate::str::contains("1 available (50.0%)"));

    let csv = fs::read_to_string(dir.path().join("domain_check_results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Domain Name,Extension,Full Domain,Available,Status");
    assert!(lines[1].starts_with("example,.com,example.com,No,"));
    assert!(lines[2].starts_with("example,.org,example.org,Yes,"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_only_filter_does_not_filter_export() {
    let server = mock_registrar().await;
    let dir = workdir();

    scout(dir.path())
        .args(["example", "-e", "com,org", "--only", "available", "-o", "picked.csv"])
        .args(http_args(&server))
        .assert()
        .success()
        .stdout(predicate::str::contains("example.org"))
        .stdout(predicate::str::contains("Showing 1 of 2 results:"))
        .stdout(predicate::str::contains("TAKEN").not());

    let csv = fs::read_to_string(dir.path().join("picked.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_export_and_no_save() {
    let server = mock_registrar().await;
    let dir = workdir();

    scout(dir.path())
        .args(["example", "-e", "org", "-o", "out.json"])
        .args(http_args(&server))
        .assert()
        .success();

    let json = fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(json.contains("\"full_domain\": \"example.org\""));
    assert!(json.contains("\"available\": \"Yes\""));

    let quiet = workdir();
    scout(quiet.path())
        .args(["example", "-e", "org", "--no-save"])
        .args(http_args(&server))
        .assert()
        .success();
    assert!(!quiet.path().join("domain_check_results.csv").exists());
}
