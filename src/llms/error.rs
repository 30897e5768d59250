/// Typed error for model gateway calls.
///
/// Failures are never folded into reply text; the caller decides how to
/// present them.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Missing or invalid API key
    #[error("Auth error: {0}")]
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),
    /// API returned a non-success HTTP status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    /// Response body was not the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
    /// The background worker died before replying
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::Parse(e.to_string())
        } else {
            LlmError::Network(e.to_string())
        }
    }
}
