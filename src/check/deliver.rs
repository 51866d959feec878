use std::time::Duration;

use tracing::warn;

use crate::post::{PostError, PostReceipt, Poster};

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, backoff: Duration::from_secs(5) }
    }
}

/// Post `text`, retrying transient failures up to `policy.max_attempts` total tries.
pub async fn deliver<P: Poster + ?Sized>(poster: &P, text: &str, policy: &RetryPolicy) -> Result<PostReceipt, PostError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match poster.post(text).await {
            Ok(receipt) => return Ok(receipt),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %err, "post failed, retrying");
                tokio::time::sleep(policy.backoff * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
