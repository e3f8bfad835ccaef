//! Blur-specific error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlurError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BlurError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "The background could not be blurred.",
        }
    }
}
