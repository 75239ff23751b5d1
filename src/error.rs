/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Error types returned by every client operation

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// A required input is missing, e.g. no tenant id could be resolved
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service rejected the credentials, or the session could not be recovered
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Any other non-success HTTP response
    #[error("service error ({status}): {message}")]
    Service {
        /// HTTP status returned by the service
        status: StatusCode,
        /// Message extracted from the response body, or `HTTP <status>`
        message: String,
    },

    /// Connection, timeout or other transport-level failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response whose body did not have the expected shape
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true for [`AppError::Authentication`]
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, AppError::Authentication(_))
    }

    /// HTTP status associated with the error, if the service answered
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Service { status, .. } => Some(*status),
            AppError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Result alias used across the crate
pub type AuthResult<T> = Result<T, AppError>;
