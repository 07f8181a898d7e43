pub mod http;
pub mod retryable;
