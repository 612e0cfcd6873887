//! Server Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Missing or malformed bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Plan id not in the price list
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Ledger failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServerError {
    /// Machine-readable code for JSON error bodies
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidPlan(_) => "INVALID_PLAN",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}
