use reqwest::StatusCode;
use thiserror::Error;

/// Every way a single request attempt can fail.
///
/// The `Display` text of each variant is the message handed back to callers in
/// a failed [`Envelope`](crate::Envelope).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request. Please check your request parameters.")]
    BadRequest,

    #[error("Unauthorized. Please authenticate or sign up.")]
    Unauthorized,

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Refresh response did not contain an access token and refresh token")]
    MissingTokens,
}

impl ApiError {
    /// Classify a non-success status code.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ApiError::BadRequest,
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            other => ApiError::Status(other.as_u16()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
