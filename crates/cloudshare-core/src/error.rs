//! Error Types

use thiserror::Error;

/// Result type alias for credit operations
pub type Result<T> = std::result::Result<T, CloudShareError>;

/// Errors surfaced by the identity provider and the credits backend
#[derive(Error, Debug)]
pub enum CloudShareError {
    /// No active session, or the provider could not issue a token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network or transport failure talking to the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with an unexpected status
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected contract
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Unknown plan identifier
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
}

impl CloudShareError {
    /// Get user-friendly message
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Auth(_) => "Your session has expired. Please sign in again.",
            Self::UnknownPlan(_) => "Invalid plan selected",
            _ => "Something went wrong. Please try again.",
        }
    }
}
