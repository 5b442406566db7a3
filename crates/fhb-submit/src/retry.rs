use crate::batch::BatchSubmission;
use crate::client::{SubmissionClient, SubmissionReceipt, SubmitError};

/// Backoff ladder for retryable send failures:
/// Attempt 1: immediate (0s)
/// Attempt 2: 15m
/// Attempt 3: 1h
/// Attempt 4+: 6h cap
pub fn default_backoff_seconds(attempt_number: u32) -> u64 {
    match attempt_number {
        0 | 1 => 0,
        2 => 15 * 60,
        3 => 60 * 60,
        _ => 6 * 60 * 60,
    }
}

#[derive(Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_seconds: fn(u32) -> u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_seconds: default_backoff_seconds,
        }
    }
}

impl RetryPolicy {
    /// Zero-wait policy for tests and dry runs.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_seconds: |_| 0,
        }
    }
}

/// Drive the outbound call with bounded retries. Timeouts retry with
/// backoff; rejections and partial acceptances return to the caller at once.
pub fn send_with_retry(
    client: &dyn SubmissionClient,
    batch: &BatchSubmission,
    policy: &RetryPolicy,
) -> Result<SubmissionReceipt, SubmitError> {
    let mut attempt = 1;
    loop {
        match client.send(batch) {
            Ok(receipt) => return Ok(receipt),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                let wait = (policy.backoff_seconds)(attempt + 1);
                tracing::warn!(
                    batch_hash = %batch.batch_hash,
                    attempt,
                    wait_secs = wait,
                    "submission timed out; retrying"
                );
                if wait > 0 {
                    std::thread::sleep(std::time::Duration::from_secs(wait));
                }
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
