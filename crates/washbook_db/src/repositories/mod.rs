//! Repository modules for database access
//!
//! This module contains the booking repository trait, its SQL implementation
//! and the factory that builds it.

pub mod booking;
pub mod booking_factory;
pub mod booking_sql;

#[cfg(test)]
mod booking_sql_test;

// Re-export the booking repository and factory for ease of use
pub use booking::{Booking, BookingRepository, DbBooking, InsertOutcome, NewBooking};
pub use booking_factory::BookingRepositoryFactory;
pub use booking_sql::SqlBookingRepository;
