use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Input was empty or matched no identifier rule
    #[error("username is required")]
    UsernameRequired,

    /// Account-detail request returned a non-success status
    #[error("User not found")]
    UserNotFound,

    /// Transport failure, timeout or undecodable upstream payload
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::UsernameRequired => StatusCode::BAD_REQUEST,
            LookupError::UserNotFound => StatusCode::NOT_FOUND,
            LookupError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to callers. Never carries upstream detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            LookupError::UsernameRequired => "username is required",
            LookupError::UserNotFound => "User not found",
            LookupError::Http(_) => "Internal server error",
        }
    }
}
