//! Test helpers for E2E tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Once;

use claw_testkit::{CapturedOutput, HarnessConfig, capture};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route harness logs through the test writer, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Harness configuration pointing at the real cluster binaries.
///
/// Panics with instructions when a binary has not been built.
pub fn cluster_config() -> HarnessConfig {
    init_tracing();
    let config = HarnessConfig::from_env();
    for bin in [&config.master_bin, &config.agent_bin, &config.execute_bin] {
        assert!(
            Path::new(bin).is_file(),
            "{} not found; run `cargo test --workspace` or set CLAW_MASTER_BIN, \
             CLAW_AGENT_BIN and CLAW_EXECUTE_BIN",
            bin.display()
        );
    }
    config
}

/// Run the CLI in-process and return what it printed.
pub fn clawbernetes(args: &[&str]) -> CapturedOutput {
    let argv: Vec<&str> = std::iter::once("clawbernetes").chain(args.iter().copied()).collect();
    let (result, output) = capture(|out| claw_cli::run_blocking(argv, out));
    if let Err(e) = result {
        panic!("clawbernetes {args:?} failed: {e}\noutput:\n{output}");
    }
    output
}
