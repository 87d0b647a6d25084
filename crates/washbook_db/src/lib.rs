//! Database integration for Washbook
//!
//! This crate provides the booking store: a database client over an `sqlx::Any`
//! pool (SQLite driver) and the repository for the `agendamentos` table.
//!
//! # Features
//!
//! - Connection pooling with one connection acquired per request
//! - Integration with the Washbook configuration system
//! - Schema creation and upgrade of older `agendamentos` tables
//! - Slot uniqueness enforced by the database
//!
//! # Example
//!
//! ```rust,no_run
//! use washbook_config::AppConfig;
//! use washbook_db::{BookingRepository, BookingRepositoryFactory, DbClientFactory, RepositoryFactory};
//! use std::sync::Arc;
//!
//! async fn setup_db() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(AppConfig::default());
//!     let db_client = DbClientFactory::new().from_app_config(&config).await?;
//!     let repository = BookingRepositoryFactory::new(&config.booking.slot_format)
//!         .create_repository(db_client);
//!     repository.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

// Re-export the client, factory, and repository traits for ease of use
pub use client::{DbClient, DbConnection};
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

// Re-export the repositories module components for ease of use
pub use repositories::{
    BookingRepository, BookingRepositoryFactory, DbBooking, InsertOutcome,
    SqlBookingRepository,
};
