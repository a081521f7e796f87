use serde_json::Value;
use thiserror::Error;

/// Result type alias for Getui operations
pub type Result<T> = std::result::Result<T, GetuiError>;

/// Getui Client Error Types
#[derive(Error, Debug)]
pub enum GetuiError {
    /// The provider answered with a `result` other than `ok`
    #[error("Getui rejected request: {result}")]
    Provider { result: String, detail: Value },

    #[error("Getui request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Getui API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Getui response: {0}")]
    Decode(String),

    #[error("Failed to build request body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Getui configuration error: {0}")]
    Config(String),
}

impl GetuiError {
    /// Build a provider error from a raw response body
    pub fn provider(detail: Value) -> Self {
        let result = match detail.get("result") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "missing result".to_string(),
        };
        GetuiError::Provider { result, detail }
    }

    /// Transport-level failures: network, non-2xx status, malformed JSON
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GetuiError::Transport(_) | GetuiError::Status { .. } | GetuiError::Decode(_)
        )
    }

    /// Raw provider response for `Provider` errors
    pub fn detail(&self) -> Option<&Value> {
        match self {
            GetuiError::Provider { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl From<GetuiError> for String {
    fn from(err: GetuiError) -> Self {
        err.to_string()
    }
}
