use thiserror::Error;

/// Failures talking to the form script endpoint.
///
/// A load or submit either fully succeeds or surfaces exactly one of these;
/// nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, bad body).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    /// The endpoint answered 2xx but reported `success: false`.
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    pub(crate) fn backend(message: Option<String>) -> Self {
        Self::Backend(message.unwrap_or_else(|| "unknown backend error".to_string()))
    }
}
