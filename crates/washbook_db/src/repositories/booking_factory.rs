//! Factory for creating booking repositories

use crate::repositories::booking_sql::SqlBookingRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating booking repositories
///
/// Carries the slot format every repository it creates stores slots with.
#[derive(Debug, Clone)]
pub struct BookingRepositoryFactory {
    slot_format: String,
}

impl BookingRepositoryFactory {
    /// Create a new booking repository factory
    ///
    /// # Arguments
    ///
    /// * `slot_format` - chrono format of the persisted slot, e.g. `%d/%m/%Y %H:%M`
    pub fn new(slot_format: impl Into<String>) -> Self {
        Self {
            slot_format: slot_format.into(),
        }
    }
}

impl RepositoryFactory<SqlBookingRepository, DbClient> for BookingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlBookingRepository {
        SqlBookingRepository::new(db_client, self.slot_format.clone())
    }
}
