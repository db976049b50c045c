// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors to caller-facing responses
// - Consistent error format for every command
// - Never exposes internal implementation details
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response returned by every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    /// Transport-neutral status code (HTTP semantics)
    pub status: u16,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Referenced entity does not exist (404)
    NotFound,

    /// Bad field value or dangling reference (422)
    Validation,

    /// Duplicate subscription or restricted delete (409)
    Conflict,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> u16 {
        match self {
            ErrorType::NotFound => 404,
            ErrorType::Validation => 422,
            ErrorType::Conflict => 409,
            ErrorType::Database | ErrorType::Internal => 500,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            status: error_type.status(),
            message,
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(what) => {
                Self::new(ErrorType::NotFound, format!("{} not found", what), None)
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                "Validation failed".to_string(),
                Some(domain_error.to_string()),
            ),

            AppError::Conflict(message) => Self::new(ErrorType::Conflict, message, None),

            AppError::Database(db_error) => {
                error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed".to_string(),
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                error!("Connection pool error: {}", pool_error);
                Self::new(
                    ErrorType::Database,
                    "Database connection failed".to_string(),
                    None,
                )
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(
                    ErrorType::Internal,
                    "Data serialization failed".to_string(),
                    None,
                )
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::Internal,
                    "File system operation failed".to_string(),
                    Some(io_error.to_string()),
                )
            }

            AppError::Config(message) => Self::new(
                ErrorType::Internal,
                "Invalid configuration".to_string(),
                Some(message),
            ),

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

/// Result type returned by every command
pub type CommandResult<T> = Result<T, ErrorResponse>;
