use thiserror::Error;

/// Top-level error type for tbot.
///
/// Remote-call failures are classified so the update loop can decide
/// between a silent retry and surfacing the error to the consumer.
#[derive(Debug, Error)]
pub enum TbotError {
    /// The request never completed (connect failure, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a 5xx status.
    #[error("server error ({status}): {description}")]
    Server { status: u16, description: String },

    /// The API asked us to slow down (HTTP 429).
    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    /// The API answered with `ok: false`.
    #[error("api error {code}: {description}")]
    Api { code: i64, description: String },

    /// The response body did not match the API envelope or the expected result.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TbotError {
    /// Whether the failure is likely temporary and the identical request
    /// should be retried without involving the consumer.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TbotError::Network(_) | TbotError::Server { .. } | TbotError::RateLimited { .. }
        )
    }
}
