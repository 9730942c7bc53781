use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KountaError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{context}: unexpected status {status}")]
    Status { context: String, status: StatusCode },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Access token is not a valid header value")]
    InvalidToken,

    #[error("Gave up after {0} redirects")]
    TooManyRedirects(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KountaError {
    /// Map a status Kounta answered with to the matching error.
    pub fn from_status(context: impl Into<String>, status: StatusCode) -> Self {
        let context = context.into();
        match status {
            StatusCode::UNAUTHORIZED => KountaError::Unauthorized(context),
            StatusCode::NOT_FOUND => KountaError::NotFound(context),
            _ => KountaError::Status { context, status },
        }
    }
}

pub type KountaResult<T> = Result<T, KountaError>;
