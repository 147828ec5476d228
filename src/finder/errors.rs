//! Station finder error types

use thiserror::Error;

/// Message shown when the service answers with a non-success status
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch stations";

/// Broad classification used to pick the notification shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised locally before any network activity
    Validation,
    /// Raised by the network client
    Request,
}

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Please enter both latitude and longitude.")]
    MissingInformation,

    #[error("{field} '{value}' is not a valid number.")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
    },

    #[error("Failed to fetch stations")]
    Status {
        status_code: u16,
    },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed station response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FinderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FinderError::MissingInformation | FinderError::InvalidCoordinate { .. } => {
                ErrorKind::Validation
            }
            FinderError::Status { .. } | FinderError::Http(_) | FinderError::Decode(_) => {
                ErrorKind::Request
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Dialog title for this error
    pub fn title(&self) -> &'static str {
        match self {
            FinderError::MissingInformation => "Missing Information",
            FinderError::InvalidCoordinate { .. } => "Invalid Coordinates",
            _ => "Oops...",
        }
    }
}
