//! Integration tests for CLI commands

#![allow(deprecated)]

use assert_cmd::{assert::OutputAssertExt, cargo::CommandCargoExt};
use predicates::prelude::*;
use std::process::Command;

/// Endpoint on a port nothing listens on
fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://{}/chat/answer", listener.local_addr().unwrap())
}

#[test]
fn test_main_command_help() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn test_version_includes_build_suffix() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!("astrarag {}", astrarag::VERSION)));
}

#[test]
fn test_ask_command_help() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("ask").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ask a single question"));
}

#[test]
fn test_ask_with_unreachable_backend_reports_connection_error() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("ask")
        .arg("What is in my documents?")
        .arg("--json")
        .arg("--endpoint")
        .arg(dead_endpoint());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"connection_failure\""))
        .stdout(predicate::str::contains("Connection Error"));
}

#[test]
fn test_ask_rejects_blank_message() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("ask").arg("   ").arg("--endpoint").arg(dead_endpoint());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Message is empty"));
}

#[test]
fn test_health_with_unreachable_backend() {
    let endpoint = dead_endpoint();
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("health").arg("--endpoint").arg(&endpoint);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Backend not reachable at {}",
            endpoint
        )));
}

#[test]
fn test_config_uses_env_endpoint() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("config")
        .env("CHAT_ENDPOINT_URL", "http://rag.internal:9000/chat/answer");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("http://rag.internal:9000/chat/answer"))
        .stdout(predicate::str::contains("Question Answer Agent"));
}

#[test]
fn test_invalid_endpoint_fails() {
    let mut cmd = Command::cargo_bin("astrarag").unwrap();
    cmd.arg("ask").arg("hello").arg("--endpoint").arg("not a url");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Chat endpoint is not configured correctly"));
}
