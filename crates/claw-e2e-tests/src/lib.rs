//! End-to-end tests for Clawbernetes.
//!
//! These tests exercise the full stack with real processes:
//! - Master and agent startup, registration and shutdown
//! - Tasks launched through `claw-execute`
//! - CLI output checked against the agent's HTTP endpoints
//!
//! The `claw-master`, `claw-agent` and `claw-execute` binaries must be built
//! (`cargo test --workspace` does this) or named by `CLAW_*_BIN`.

#![cfg(test)]
