use assert_cmd::prelude::*;
use chrono::Utc;
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const CLUSTER_PATH: &str = "/api/clusters_mgmt/v1/clusters/2abc";

fn future_timestamp() -> String {
    (Utc::now() + chrono::Duration::hours(1)).to_rfc3339()
}

/// Config with a cached access token, so no token exchange happens.
fn write_config(dir: &Path, api_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "api_url: {api_url}\naccess_token:\n  token: dummy\n  expires_at: {}\npreferences:\n  poll_interval: 1\n  poll_timeout: 5\n",
        future_timestamp()
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn clusterwait() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("clusterwait"));
    for var in [
        "CLUSTERWAIT_CONFIG",
        "CLUSTERWAIT_FORMAT",
        "CLUSTERWAIT_API_URL",
        "CLUSTERWAIT_TOKEN_URL",
        "CLUSTERWAIT_TOKEN",
        "CLUSTERWAIT_DEBUG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn cluster_body(state: &str) -> String {
    format!(
        r#"{{"kind":"Cluster","id":"2abc","name":"demo","state":"{state}","openshift_version":"4.15.2"}}"#
    )
}

#[test]
fn version_prints_package_version() {
    clusterwait()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://localhost:9");

    let assert = clusterwait()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("Access token valid"));
    assert!(stdout.contains("http://localhost:9"));

    Ok(())
}

#[test]
fn status_without_config_suggests_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    clusterwait()
        .arg("status")
        .arg("--config")
        .arg(temp.path().join("absent.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration not found"))
        .stdout(predicate::str::contains("clusterwait login"));

    Ok(())
}

#[test]
fn cluster_get_without_credentials_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    clusterwait()
        .args(["cluster", "get", "2abc", "--config"])
        .arg(temp.path().join("absent.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("clusterwait login"));

    Ok(())
}

#[test]
fn cluster_get_prints_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _cluster = server
        .mock("GET", CLUSTER_PATH)
        .match_header("authorization", "Bearer dummy")
        .with_status(200)
        .with_body(cluster_body("ready"))
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = clusterwait()
        .args(["cluster", "get", "2abc", "--format", "json", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"]["id"], "2abc");
    assert_eq!(value["data"]["state"], "ready");
    assert_eq!(value["data"]["version"], "4.15.2");

    Ok(())
}

#[test]
fn cluster_get_not_found_reports_reason() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _cluster = server
        .mock("GET", CLUSTER_PATH)
        .with_status(404)
        .with_body(
            r#"{"kind":"Error","id":"404","code":"CLUSTERS-MGMT-404","reason":"Cluster '2abc' not found"}"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    clusterwait()
        .args(["cluster", "get", "2abc", "--config"])
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cluster '2abc' not found"));

    Ok(())
}

#[test]
fn cluster_wait_succeeds_when_ready() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let cluster = server
        .mock("GET", CLUSTER_PATH)
        .with_status(200)
        .with_body(cluster_body("ready"))
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = clusterwait()
        .args(["cluster", "wait", "2abc", "--format", "json", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"]["summary"], "Cluster 2abc is ready");
    assert_eq!(value["data"]["status"], 200);
    assert_eq!(value["data"]["resource"]["state"], "ready");
    cluster.assert();

    Ok(())
}

#[test]
fn cluster_wait_times_out_with_exit_code_2() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _cluster = server
        .mock("GET", CLUSTER_PATH)
        .with_status(200)
        .with_body(cluster_body("installing"))
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    clusterwait()
        .args([
            "cluster",
            "wait",
            "2abc",
            "--interval",
            "1s",
            "--timeout",
            "2s",
            "--format",
            "json",
            "--config",
        ])
        .arg(&config_path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Timed out"));

    Ok(())
}

#[test]
fn cluster_wait_fails_fast_on_error_state() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _cluster = server
        .mock("GET", CLUSTER_PATH)
        .with_status(200)
        .with_body(
            r#"{"kind":"Cluster","id":"2abc","state":"error","status":{"state":"error","provision_error_code":"OCM3055","provision_error_message":"insufficient quota"}}"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    clusterwait()
        .args(["cluster", "wait", "2abc", "--timeout", "1m", "--config"])
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OCM3055: insufficient quota"));

    Ok(())
}

#[test]
fn cluster_wait_gone_accepts_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _cluster = server
        .mock("GET", CLUSTER_PATH)
        .with_status(404)
        .with_body(r#"{"kind":"Error","reason":"Cluster '2abc' not found"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    clusterwait()
        .args(["cluster", "wait", "2abc", "--gone", "--format", "table", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster 2abc no longer exists"));

    Ok(())
}

#[test]
fn cluster_wait_rejects_zero_interval() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://localhost:9");

    clusterwait()
        .args(["cluster", "wait", "2abc", "--interval", "0s", "--config"])
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("interval must be greater than zero"));

    Ok(())
}

#[test]
fn cluster_wait_rejects_bad_duration() {
    clusterwait()
        .args(["cluster", "wait", "2abc", "--timeout", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration 'soon'"));
}

#[test]
fn node_pool_wait_succeeds_with_replicas() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _pool = server
        .mock("GET", "/api/clusters_mgmt/v1/clusters/2abc/node_pools/workers")
        .with_status(200)
        .with_body(
            r#"{"kind":"NodePool","id":"workers","replicas":2,"status":{"current_replicas":2}}"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    clusterwait()
        .args([
            "node-pool",
            "wait",
            "2abc",
            "workers",
            "--format",
            "table",
            "--config",
        ])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2/2"));

    Ok(())
}

#[test]
fn login_saves_exchanged_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let token = server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "offline-abc".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"opaque","expires_in":900,"refresh_token":"offline-rotated"}"#)
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");

    clusterwait()
        .args(["login", "--offline-token", "offline-abc", "--token-url"])
        .arg(format!("{}/token", server.url()))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Authentication successful"));

    token.assert();
    let saved = fs::read_to_string(&config_path)?;
    assert!(saved.contains("refresh_token: offline-rotated"));
    assert!(saved.contains("token: opaque"));

    Ok(())
}

#[test]
fn login_reports_rejected_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _token = server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant","error_description":"Offline user session not found"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");

    clusterwait()
        .args(["login", "--offline-token", "stale", "--token-url"])
        .arg(format!("{}/token", server.url()))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Offline user session not found"));

    assert!(!config_path.exists());

    Ok(())
}

#[test]
fn token_flag_works_without_config() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _token = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token":"fresh","expires_in":900}"#)
        .create();
    let _cluster = server
        .mock("GET", CLUSTER_PATH)
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(cluster_body("hibernating"))
        .create();

    let temp = tempdir()?;
    let config_path = temp.path().join("absent.yaml");

    clusterwait()
        .args(["cluster", "wait", "2abc", "--state", "hibernating", "--format", "table"])
        .args(["--token", "offline-abc", "--api-url"])
        .arg(server.url())
        .arg("--token-url")
        .arg(format!("{}/token", server.url()))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("hibernating"));

    // A one-off token is never persisted
    assert!(!config_path.exists());

    Ok(())
}

#[test]
fn completion_generates_script() {
    clusterwait()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clusterwait"));
}
