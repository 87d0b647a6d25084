//! Repository for bookings
//!
//! This module provides the interface for storing and retrieving bookings
//! (`agendamentos`) in the database.

use crate::client::DbConnection;
use crate::error::DbError;
use chrono::NaiveDateTime;
use sqlx::{AnyConnection, FromRow};

// Re-export Booking from washbook_common for convenience
pub use washbook_common::models::{Booking, NewBooking};

/// Row shape of the `agendamentos` table
///
/// The slot is stored as formatted text (`data_hora_str`), so turning a row back
/// into a [`Booking`] needs the slot format and may fail.
#[derive(Debug, Clone, FromRow)]
pub struct DbBooking {
    pub id: i64,
    pub cliente: String,
    pub placa: String,
    pub tipo_veiculo: String,
    pub servico: String,
    pub data_hora_str: String,
}

impl DbBooking {
    /// Convert the row into a [`Booking`], parsing the stored slot with `slot_format`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DecodeError`] if `data_hora_str` does not match `slot_format`.
    pub fn into_booking(self, slot_format: &str) -> Result<Booking, DbError> {
        let scheduled_at = NaiveDateTime::parse_from_str(&self.data_hora_str, slot_format)
            .map_err(|e| {
                DbError::DecodeError(format!(
                    "booking {} has unparsable slot {:?}: {}",
                    self.id, self.data_hora_str, e
                ))
            })?;

        Ok(Booking {
            id: self.id,
            client_name: self.cliente,
            plate: self.placa,
            vehicle_type: self.tipo_veiculo,
            service: self.servico,
            scheduled_at,
        })
    }
}

/// Result of an insert attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The booking was stored and got its id
    Inserted(Booking),
    /// Another booking already holds the slot; nothing was stored
    Conflict,
}

/// Repository for bookings
///
/// Every query method runs on a caller-supplied connection so one request uses a
/// single pooled connection for all of its queries.
pub trait BookingRepository: Send + Sync {
    /// Initialize the database schema
    ///
    /// Creates the `agendamentos` table and its slot uniqueness index if they
    /// don't exist, and adds columns missing from tables created by older versions.
    /// Safe to run on every start.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the schema was initialized successfully, or an error if it failed
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Acquire a pooled connection for one unit of work
    ///
    /// The connection is returned to the pool when dropped.
    fn acquire(&self) -> impl std::future::Future<Output = Result<DbConnection, DbError>> + Send;

    /// Find the booking holding a slot
    ///
    /// # Arguments
    ///
    /// * `conn` - The connection to run the query on
    /// * `slot` - The slot; compared on its formatted representation
    ///
    /// # Returns
    ///
    /// The booking if the slot is taken, or None if it is free
    fn find_by_slot(
        &self,
        conn: &mut AnyConnection,
        slot: NaiveDateTime,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Insert a booking
    ///
    /// # Arguments
    ///
    /// * `conn` - The connection to run the query on
    /// * `booking` - The booking to store
    ///
    /// # Returns
    ///
    /// [`InsertOutcome::Inserted`] with the stored booking, or
    /// [`InsertOutcome::Conflict`] if the slot uniqueness constraint rejected it
    fn insert_booking(
        &self,
        conn: &mut AnyConnection,
        booking: NewBooking,
    ) -> impl std::future::Future<Output = Result<InsertOutcome, DbError>> + Send;

    /// List all bookings ordered by slot, then id
    ///
    /// Rows whose stored slot cannot be parsed are skipped.
    fn list_bookings(
        &self,
        conn: &mut AnyConnection,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;
}
