use thiserror::Error;

/// The base error type for all Washbook errors that reach the HTTP boundary.
///
/// Each crate keeps its own error enum and converts into this one where a
/// handler has to produce a response.
#[derive(Error, Debug)]
pub enum WashbookError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for WashbookError {
    fn status_code(&self) -> u16 {
        match self {
            WashbookError::ParseError(_) => 400,
            WashbookError::ConfigError(_) => 500,
            WashbookError::DatabaseError(_) => 500,
            WashbookError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for WashbookError {
    fn from(err: serde_json::Error) -> Self {
        WashbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for WashbookError {
    fn from(err: std::io::Error) -> Self {
        WashbookError::InternalError(err.to_string())
    }
}
