//! Integration tests for the `breeze` CLI binary.
//!
//! Argument parsing, help output, completions and error handling run
//! without a tenant; the end-to-end cases point the binary at a wiremock
//! server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `breeze` binary with env isolation.
///
/// Clears all `BREEZE_*` env vars and points config directories at `home`
/// so tests never touch the user's real configuration.
fn breeze_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("breeze");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("BREEZE_PROFILE")
        .env_remove("BREEZE_URL")
        .env_remove("BREEZE_TOKEN")
        .env_remove("BREEZE_OUTPUT")
        .env_remove("BREEZE_DEFAULT_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Start a mock tenant with two sites and one signal.
fn mock_tenant() -> (Runtime, MockServer) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());

    let devices = json!([
        {
            "deviceId": 1, "title": "WTG01", "deviceType": "turbine",
            "site": { "siteId": 100, "title": "Windy Ridge" },
            "latitude": 10.0, "longitude": 20.0
        },
        {
            "deviceId": 3, "title": "INV01", "deviceType": "inverter",
            "site": { "siteId": 200, "title": "Sunny Flats" },
            "latitude": "40.0", "longitude": "5.0"
        }
    ]);
    let signals = json!([{ "dataSignalId": 10, "title": "Power", "unit": "kW" }]);
    let data = json!([
        {
            "aggregateId": 200,
            "dataSignal": { "dataSignalId": 10, "title": "Power" },
            "data": { "2024-01-01T00:00:00": 2.0, "2024-01-01T00:10:00": 4.0 }
        },
        {
            "aggregateId": 100,
            "dataSignal": { "dataSignalId": 10, "title": "Power" },
            "data": { "2024-01-01T00:00:00": 1.0, "2024-01-01T00:10:00": null }
        }
    ]);

    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/api/2.0/devices.json"))
            .and(header("Breeze-ApiToken", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(devices))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/datasignals.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(signals))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/data.json"))
            .and(query_param("aggregate", "site"))
            .and(query_param("dataSignalIds", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(data))
            .mount(&server)
            .await;
    });

    (rt, server)
}

fn api_root(server: &MockServer) -> String {
    format!("{}/api/2.0/", server.uri())
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = breeze_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("sites")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("signals"))
            .and(predicate::str::contains("data")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("breeze"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_sites_without_config_fails() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .arg("sites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration").or(predicate::str::contains("config")));
}

#[test]
fn test_url_without_token_fails_with_auth_code() {
    let home = tempfile::tempdir().unwrap();
    let output = breeze_cmd(home.path())
        .args(["--url", "https://tenant.example.com/api/2.0/", "sites"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("token"));
}

#[test]
fn test_data_requires_a_signal_name() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path()).arg("data").assert().failure().code(2);
}

#[test]
fn test_start_requires_end() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args(["data", "Power", "--start", "2024-01-01T00:00:00"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    let output = breeze_cmd(home.path())
        .args(["--output", "invalid", "sites"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_init_then_show_masks_token() {
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args([
            "--url",
            "https://tenant.example.com/api/2.0/",
            "--token",
            "s3cret",
            "config",
            "init",
            "--name",
            "work",
        ])
        .assert()
        .success();

    breeze_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.work]")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("s3cret").not()),
        );
}

#[test]
fn test_config_use_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = breeze_cmd(home.path())
        .args(["config", "use", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

// ── Against a mock tenant ───────────────────────────────────────────

#[test]
fn test_sites_plain_lists_titles_sorted() {
    let (_rt, server) = mock_tenant();
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args(["--url", &api_root(&server), "--token", "tok", "-o", "plain", "sites"])
        .assert()
        .success()
        .stdout("Sunny Flats\nWindy Ridge\n");
}

#[test]
fn test_signals_lists_registry() {
    let (_rt, server) = mock_tenant();
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args(["--url", &api_root(&server), "--token", "tok", "-o", "plain", "signals"])
        .assert()
        .success()
        .stdout("Power\n");
}

#[test]
fn test_data_fetches_per_site() {
    let (_rt, server) = mock_tenant();
    let home = tempfile::tempdir().unwrap();
    breeze_cmd(home.path())
        .args([
            "--url",
            &api_root(&server),
            "--token",
            "tok",
            "-o",
            "json",
            "data",
            "Power",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"owner\": \"site Sunny Flats\"")
                .and(predicate::str::contains("\"mean\": 3.0"))
                .and(predicate::str::contains("\"owner\": \"site Windy Ridge\"")),
        );
}

#[test]
fn test_unmatched_token_reports_http_status() {
    let (_rt, server) = mock_tenant();
    let home = tempfile::tempdir().unwrap();
    // The devices mock only matches the right token; wiremock answers 404
    // otherwise, which is reported as an HTTP error.
    let output = breeze_cmd(home.path())
        .args(["--url", &api_root(&server), "--token", "wrong", "sites"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("404"));
}
