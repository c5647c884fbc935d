//! Integration tests for the `inkhole` binary.
//!
//! Argument parsing and help output run without any appliance; the
//! end-to-end tests stand one up with wiremock and drive the binary
//! against it through environment variables.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `inkhole` binary with env isolation.
///
/// Points HOME and the cache directory at a temp path so tests never
/// touch the user's real configuration or cache records.
fn inkhole_cmd(tmp: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("inkhole");
    cmd.env("HOME", tmp)
        .env("XDG_CONFIG_HOME", tmp.join("config"))
        .env("XDG_CACHE_HOME", tmp.join("cache"))
        .env("INKHOLE_CACHE_DIR", tmp.join("cache"))
        .env_remove("INKHOLE_CONFIG_FILE")
        .env_remove("INKHOLE_HOST")
        .env_remove("INKHOLE_PORT")
        .env_remove("INKHOLE_PASSWORD")
        .env_remove("INKHOLE_INTERFACE")
        .env_remove("INKHOLE_TIMEOUT_SECS");
    cmd
}

/// A local port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn mount_appliance(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clients": { "active": 3 },
            "queries": { "blocked": 42 }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dns/blocking"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "blocking": true })))
        .mount(server)
        .await;
}

// ── Argument parsing ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let tmp = tempfile::tempdir().unwrap();
    inkhole_cmd(tmp.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("status panel")
            .and(predicate::str::contains("--force"))
            .and(predicate::str::contains("--dry-run")),
    );
}

#[test]
fn test_version_flag() {
    let tmp = tempfile::tempdir().unwrap();
    inkhole_cmd(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("inkhole"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let output = inkhole_cmd(tmp.path()).arg("--bogus").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Failure path ────────────────────────────────────────────────────

#[test]
fn test_unreachable_appliance_renders_placeholder_and_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let output = inkhole_cmd(tmp.path())
        .env("INKHOLE_HOST", "127.0.0.1")
        .env("INKHOLE_PORT", closed_port().to_string())
        .output()
        .unwrap();

    assert!(!output.status.success());
    // connection failures map to exit code 7
    assert_eq!(output.status.code(), Some(7));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Error from API."),
        "expected error placeholder on stdout:\n{stdout}"
    );
}

// ── End-to-end against a mock appliance ─────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_prints_panel() {
    let server = MockServer::start().await;
    mount_appliance(&server).await;

    let port = server.address().port();
    let tmp = tempfile::tempdir().unwrap();
    let tmp_path = tmp.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        inkhole_cmd(&tmp_path)
            .env("INKHOLE_HOST", "127.0.0.1")
            .env("INKHOLE_PORT", port.to_string())
            .arg("--dry-run")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "run failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("There are 3 clients connected"), "{stdout}");
    assert!(stdout.contains("Blocked 42 ads"), "{stdout}");
    assert!(stdout.contains("blocking enabled"), "{stdout}");
    assert!(stdout.contains("Updated:"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_second_run_skips_redraw() {
    let server = MockServer::start().await;
    mount_appliance(&server).await;

    let port = server.address().port();
    let tmp = tempfile::tempdir().unwrap();
    let tmp_path = tmp.path().to_path_buf();

    let (first, second) = tokio::task::spawn_blocking(move || {
        let run = |p: &std::path::Path| {
            inkhole_cmd(p)
                .env("INKHOLE_HOST", "127.0.0.1")
                .env("INKHOLE_PORT", port.to_string())
                .output()
                .unwrap()
        };
        (run(&tmp_path), run(&tmp_path))
    })
    .await
    .unwrap();

    assert!(first.status.success());
    assert!(
        String::from_utf8_lossy(&first.stdout).contains("Blocked 42 ads"),
        "first run must draw"
    );

    assert!(second.status.success());
    assert!(
        !String::from_utf8_lossy(&second.stdout).contains("Blocked 42 ads"),
        "second run with identical content must skip the redraw"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_force_redraws_unchanged_content() {
    let server = MockServer::start().await;
    mount_appliance(&server).await;

    let port = server.address().port();
    let tmp = tempfile::tempdir().unwrap();
    let tmp_path = tmp.path().to_path_buf();

    let (_, second) = tokio::task::spawn_blocking(move || {
        let run = |force: bool| {
            let mut cmd = inkhole_cmd(&tmp_path);
            cmd.env("INKHOLE_HOST", "127.0.0.1")
                .env("INKHOLE_PORT", port.to_string());
            if force {
                cmd.arg("--force");
            }
            cmd.output().unwrap()
        };
        (run(false), run(true))
    })
    .await
    .unwrap();

    assert!(second.status.success());
    assert!(
        String::from_utf8_lossy(&second.stdout).contains("Blocked 42 ads"),
        "--force must redraw even when unchanged"
    );
}
