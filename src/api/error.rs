//! Gateway error kinds

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not signed in or session expired")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Error for a non-success HTTP status; `None` for 2xx
    pub fn from_status(status: u16, body: &str) -> Option<Self> {
        match status {
            200..=299 => None,
            401 | 403 => Some(Self::Unauthorized),
            404 => Some(Self::NotFound),
            _ => {
                let message = body.trim();
                let message = if message.is_empty() { "no details".to_string() } else { message.to_string() };
                Some(Self::Rejected { status, message })
            }
        }
    }
}
