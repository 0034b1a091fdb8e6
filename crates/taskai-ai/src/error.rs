use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing API key")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingApiKey => "missing_api_key",
            GatewayError::Http(_) => "http",
            GatewayError::Api { .. } => "api",
            GatewayError::InvalidResponse(_) => "invalid_response",
        }
    }
}
