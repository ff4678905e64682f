//! Bounded retry policy shared by all outbound tool adapters.
//!
//! A "terminal" response (success or a recognized client-error status) ends
//! the loop immediately. Transport failures and unrecognized statuses each
//! consume an attempt; after the last attempt the most recent transport
//! failure propagates. There is no inter-attempt delay.

use anyhow::{Result, anyhow};
use tracing::debug;

/// Maximum attempts per request.
pub const MAX_ATTEMPTS: usize = 3;

/// Run `attempt` until it yields a response `is_terminal` accepts, up to
/// [`MAX_ATTEMPTS`] times.
pub fn with_retries<R>(
    is_terminal: impl Fn(&R) -> bool,
    mut attempt: impl FnMut() -> Result<R>,
) -> Result<R> {
    let mut last_err = None;
    for n in 1..=MAX_ATTEMPTS {
        match attempt() {
            Ok(response) if is_terminal(&response) => return Ok(response),
            Ok(_) => debug!(attempt = n, "non-terminal response, retrying"),
            Err(err) => {
                debug!(attempt = n, error = %err, "transport failure");
                last_err = Some(err);
            }
        }
    }
    Err(last_err
        .unwrap_or_else(|| anyhow!("no terminal response after {MAX_ATTEMPTS} attempts")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn transport_failures_then_success_uses_all_attempts() {
        let attempts = Cell::new(0usize);
        let result = with_retries(
            |status: &u16| *status == 200,
            || {
                attempts.set(attempts.get() + 1);
                if attempts.get() < 3 {
                    Err(anyhow!("connection reset"))
                } else {
                    Ok(200)
                }
            },
        );
        assert_eq!(result.expect("terminal response"), 200);
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn terminal_client_error_returns_on_first_attempt() {
        let attempts = Cell::new(0usize);
        let result = with_retries(
            |status: &u16| [200, 400, 401, 403, 404].contains(status),
            || {
                attempts.set(attempts.get() + 1);
                Ok(404)
            },
        );
        assert_eq!(result.expect("terminal response"), 404);
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn exhausted_transport_failures_propagate_last_error() {
        let attempts = Cell::new(0usize);
        let result: Result<u16> = with_retries(
            |_| true,
            || {
                attempts.set(attempts.get() + 1);
                Err(anyhow!("timeout {}", attempts.get()))
            },
        );
        assert_eq!(attempts.get(), MAX_ATTEMPTS);
        assert_eq!(result.expect_err("exhausted").to_string(), "timeout 3");
    }

    #[test]
    fn non_terminal_statuses_are_retried_like_transport_failures() {
        let attempts = Cell::new(0usize);
        let result: Result<u16> = with_retries(
            |status| *status == 200,
            || {
                attempts.set(attempts.get() + 1);
                Ok(500)
            },
        );
        assert_eq!(attempts.get(), MAX_ATTEMPTS);
        assert!(result.is_err());
    }
}
