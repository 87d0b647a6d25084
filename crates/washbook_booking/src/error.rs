// --- File: crates/washbook_booking/src/error.rs ---

use thiserror::Error;
use washbook_common::WashbookError;
use washbook_db::DbError;

/// Infrastructure failures of the booking flow.
///
/// Invalid input and taken slots are outcomes, not errors; see
/// [`IntakeOutcome`](crate::logic::IntakeOutcome).
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<BookingError> for WashbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Database(e) => WashbookError::DatabaseError(e.to_string()),
            BookingError::Config(msg) => WashbookError::ConfigError(msg),
        }
    }
}
