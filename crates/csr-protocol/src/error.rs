use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl From<reqwest::Error> for ProtocolError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialization(e.to_string())
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
