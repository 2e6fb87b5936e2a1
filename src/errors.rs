use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to decode task message: {0}")]
    Decode(String),

    #[error("Failed to build task request: {0}")]
    RequestConstruction(String),

    #[error("Failed to send task to MCP service: {0}")]
    Transport(String),

    #[error("Failed to read message batch: {0}")]
    BatchRead(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            RelayError::RequestConstruction(error.to_string())
        } else {
            RelayError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::Decode(error.to_string())
    }
}

impl From<url::ParseError> for RelayError {
    fn from(error: url::ParseError) -> Self {
        RelayError::RequestConstruction(format!("invalid MCP service URL: {}", error))
    }
}
