use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// Retry policy applied uniformly per operation: a fixed attempt bound with
/// linearly increasing backoff (`initial_backoff` × attempt index).
#[derive(Debug, Clone)]
pub struct RetryOptions {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryOptions {
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff * attempt
    }
}

/// An operation error carrying whether another attempt may succeed.
#[derive(Debug)]
pub struct Error {
    pub error: anyhow::Error,
    pub is_retryable: bool,
}

impl Error {
    pub fn always_retryable(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            is_retryable: true,
        }
    }

    pub fn permanent(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            is_retryable: false,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl From<Error> for anyhow::Error {
    fn from(e: Error) -> Self {
        e.error
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classifies errors by whether a retry is worthwhile.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for reqwest::Error {
    fn is_retryable(&self) -> bool {
        match self.status() {
            // 5xx and rate limiting are worth another attempt; other HTTP
            // statuses are permanent.
            Some(status) => {
                status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            // Transport-level failure (connect, timeout, body read).
            None => true,
        }
    }
}

/// Runs `op` until it succeeds, returns a permanent error, or exhausts the
/// attempt bound. Sleeps for the policy's backoff between attempts.
pub async fn run<T, F, Fut>(mut op: F, options: &RetryOptions) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable && attempt < options.max_attempts => {
                let delay = options.backoff(attempt);
                warn!(
                    "attempt {attempt}/{} failed, retrying in {:.1}s: {:#}",
                    options.max_attempts,
                    delay.as_secs_f32(),
                    err.error
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
