use crate::prelude::*;
use crate::utils::retryable::{self, IsRetryable};

/// Fetches a URL and returns the response body. Errors carry a retryable
/// flag so the caller's retry policy can tell transient failures (transport
/// errors, 5xx, 429) from permanent ones.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> retryable::Result<Bytes> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(classified)?;

    if let Err(err) = resp.error_for_status_ref() {
        let is_retryable = err.is_retryable();
        let mut error: anyhow::Error = err.into();
        if let Ok(body) = resp.text().await
            && !body.is_empty()
        {
            error = error.context(format!("Error message body:\n{body}"));
        }
        return Err(retryable::Error {
            error,
            is_retryable,
        });
    }

    resp.bytes().await.map_err(classified)
}

fn classified(err: reqwest::Error) -> retryable::Error {
    let is_retryable = err.is_retryable();
    retryable::Error {
        error: err.into(),
        is_retryable,
    }
}
