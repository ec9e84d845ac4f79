//! Caller-side polling.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

/// Call `check` every `interval` until it succeeds or `timeout` elapses.
///
/// `check` always runs at least once. On timeout the last error is
/// returned.
///
/// # Errors
///
/// Returns the error from the final attempt.
pub fn poll_until<T, E>(
    interval: Duration,
    timeout: Duration,
    mut check: impl FnMut() -> Result<T, E>,
) -> Result<T, E> {
    let deadline = Instant::now() + timeout;
    let mut attempt = 1u32;
    loop {
        match check() {
            Ok(value) => return Ok(value),
            Err(e) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(e);
                }
                trace!(attempt, "condition not met yet");
                attempt += 1;
                thread::sleep(interval.min(deadline - now));
            }
        }
    }
}
