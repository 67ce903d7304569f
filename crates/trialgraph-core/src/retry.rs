//! Retry with exponential backoff for registry requests

use std::time::Duration;

use crate::http::HttpError;

/// Exponential backoff: 2^attempt seconds (2s, 4s, 8s, ...)
pub const fn backoff_duration(attempt: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempt))
}

/// Retry a fallible request with exponential backoff.
///
/// Retryable errors are retried up to `max_retries` times; the final error is
/// returned unchanged so the caller decides whether it is fatal.
pub fn retry_with_backoff<T>(
    label: &str,
    max_retries: u32,
    attempt_fn: impl FnMut() -> Result<T, HttpError>,
) -> Result<T, HttpError> {
    retry_with_schedule(label, max_retries, backoff_duration, attempt_fn)
}

/// Same as [`retry_with_backoff`] with a caller-supplied delay schedule.
pub fn retry_with_schedule<T>(
    label: &str,
    max_retries: u32,
    schedule: impl Fn(u32) -> Duration,
    mut attempt_fn: impl FnMut() -> Result<T, HttpError>,
) -> Result<T, HttpError> {
    let mut attempt = 0u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < max_retries && e.is_retryable() => {
                attempt += 1;
                let delay = schedule(attempt);
                log::warn!("{label}: attempt {attempt}/{max_retries} failed: {e}, retrying in {delay:?}");
                std::thread::sleep(delay);
            }
            Err(e) => return Err(e),
        }
    }
}
