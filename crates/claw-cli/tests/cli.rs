//! Tests for the `clawbernetes` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn clawbernetes() -> Command {
    let mut cmd = Command::cargo_bin("clawbernetes").unwrap();
    cmd.env_remove("CLAWBERNETES_AGENT")
        .env_remove("CLAWBERNETES_MASTER")
        .env_remove("CLAWBERNETES_TIMEOUT_SECS");
    cmd
}

fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().to_string()
}

#[test]
fn test_help_lists_commands() {
    clawbernetes()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("container").and(predicate::str::contains("agent")));
}

#[test]
fn test_container_list_requires_agent() {
    clawbernetes()
        .args(["container", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--agent"));
}

#[test]
fn test_container_list_unreachable_agent() {
    clawbernetes()
        .args(["container", "list", "--agent", &closed_port()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("connection error"));
}

#[test]
fn test_agent_list_reads_master_from_env() {
    clawbernetes()
        .args(["agent", "list"])
        .env("CLAWBERNETES_MASTER", closed_port())
        .assert()
        .failure()
        .stderr(predicate::str::contains("connection error"));
}

#[test]
fn test_invalid_format_is_rejected() {
    clawbernetes()
        .args(["--format", "yaml", "agent", "list", "--master", "127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn test_unsupported_scheme_is_rejected() {
    clawbernetes()
        .args(["container", "list", "--agent", "ws://127.0.0.1:5051"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid argument").and(predicate::str::contains("ws://")));
}
