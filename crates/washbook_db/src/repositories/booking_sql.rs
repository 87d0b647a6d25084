//! SQL implementation of the booking repository
//!
//! This module provides a SQL implementation of the BookingRepository trait on
//! top of the `agendamentos` table.

use crate::client::DbConnection;
use crate::error::{is_unique_violation, DbError};
use crate::repositories::booking::{
    Booking, BookingRepository, DbBooking, InsertOutcome, NewBooking,
};
use crate::DbClient;
use chrono::NaiveDateTime;
use sqlx::{AnyConnection, Row};
use tracing::{debug, error, info, warn};

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    /// The database client
    db_client: DbClient,
    /// chrono format of `data_hora_str`
    slot_format: String,
}

impl SqlBookingRepository {
    /// Create a new SQL booking repository
    ///
    /// # Arguments
    ///
    /// * `db_client` - The database client
    /// * `slot_format` - chrono format slots are stored in, e.g. `%d/%m/%Y %H:%M`
    ///
    /// # Returns
    ///
    /// A new SQL booking repository
    pub fn new(db_client: DbClient, slot_format: impl Into<String>) -> Self {
        Self {
            db_client,
            slot_format: slot_format.into(),
        }
    }

    /// The database client backing this repository
    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }

    /// Count stored bookings
    ///
    /// Used to inspect the store; the booking flow never needs a count.
    pub async fn count_bookings(&self, conn: &mut AnyConnection) -> Result<i64, DbError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM agendamentos")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to count bookings: {}", e);
                DbError::QueryError(e.to_string())
            })
    }

    fn slot_key(&self, slot: NaiveDateTime) -> String {
        slot.format(&self.slot_format).to_string()
    }
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS agendamentos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cliente TEXT NOT NULL,
                placa TEXT NOT NULL,
                tipo_veiculo TEXT NOT NULL DEFAULT '',
                servico TEXT NOT NULL,
                data_hora_str TEXT NOT NULL UNIQUE
            )
        "#;

        self.db_client.execute(query).await?;

        // Tables created before vehicle types were stored lack the column
        let has_vehicle_type: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('agendamentos') WHERE name = 'tipo_veiculo'",
        )
        .fetch_one(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to inspect agendamentos columns: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        if has_vehicle_type == 0 {
            info!("Adding tipo_veiculo column to agendamentos");
            self.db_client
                .execute("ALTER TABLE agendamentos ADD COLUMN tipo_veiculo TEXT NOT NULL DEFAULT ''")
                .await?;
        }

        // Older tables have no UNIQUE constraint on the slot column
        self.db_client
            .execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_agendamentos_slot ON agendamentos (data_hora_str)",
            )
            .await
            .map_err(|e| {
                error!(
                    "Failed to create slot index; agendamentos may hold duplicate slots: {}",
                    e
                );
                e
            })?;

        info!("Booking schema initialized successfully");
        Ok(())
    }

    async fn acquire(&self) -> Result<DbConnection, DbError> {
        self.db_client.acquire().await
    }

    async fn find_by_slot(
        &self,
        conn: &mut AnyConnection,
        slot: NaiveDateTime,
    ) -> Result<Option<Booking>, DbError> {
        let slot_key = self.slot_key(slot);
        debug!("Finding booking for slot: {}", slot_key);

        let query = r#"
            SELECT id, cliente, placa, tipo_veiculo, servico, data_hora_str
            FROM agendamentos
            WHERE data_hora_str = $1
        "#;

        let result = sqlx::query_as::<_, DbBooking>(query)
            .bind(&slot_key)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to find booking by slot: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        result
            .map(|row| row.into_booking(&self.slot_format))
            .transpose()
    }

    async fn insert_booking(
        &self,
        conn: &mut AnyConnection,
        booking: NewBooking,
    ) -> Result<InsertOutcome, DbError> {
        let slot_key = self.slot_key(booking.scheduled_at);
        debug!("Inserting booking for slot: {}", slot_key);

        let query = r#"
            INSERT INTO agendamentos (cliente, placa, tipo_veiculo, servico, data_hora_str)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        "#;

        let result = sqlx::query(query)
            .bind(&booking.client_name)
            .bind(&booking.plate)
            .bind(&booking.vehicle_type)
            .bind(&booking.service)
            .bind(&slot_key)
            .fetch_one(&mut *conn)
            .await;

        let row = match result {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                warn!("Slot {} was taken before the insert completed", slot_key);
                return Ok(InsertOutcome::Conflict);
            }
            Err(e) => {
                error!("Failed to insert booking: {}", e);
                return Err(DbError::QueryError(e.to_string()));
            }
        };

        let id: i64 = row.try_get("id").map_err(|e| {
            error!("Failed to read id of inserted booking: {}", e);
            DbError::DecodeError(e.to_string())
        })?;

        info!("Booking {} created for slot {}", id, slot_key);
        Ok(InsertOutcome::Inserted(booking.with_id(id)))
    }

    async fn list_bookings(&self, conn: &mut AnyConnection) -> Result<Vec<Booking>, DbError> {
        debug!("Listing all bookings");

        let query = r#"
            SELECT id, cliente, placa, tipo_veiculo, servico, data_hora_str
            FROM agendamentos
        "#;

        let rows = sqlx::query_as::<_, DbBooking>(query)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to list bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let mut bookings: Vec<Booking> = rows
            .into_iter()
            .filter_map(|row| match row.into_booking(&self.slot_format) {
                Ok(booking) => Some(booking),
                Err(e) => {
                    error!("Skipping booking row: {}", e);
                    None
                }
            })
            .collect();

        // DD/MM/YYYY text does not sort chronologically, so order on the parsed value
        bookings.sort_by(|a, b| {
            a.scheduled_at
                .cmp(&b.scheduled_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(bookings)
    }
}
