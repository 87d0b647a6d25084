//! Factory for creating database clients

use crate::client::DbClient;
use crate::error::DbError;
use std::sync::Arc;
use tracing::{debug, warn};
use washbook_config::{AppConfig, DatabaseConfig};

/// Factory for creating database clients from the different configuration sources.
#[derive(Debug, Clone)]
pub struct DbClientFactory;

impl DbClientFactory {
    /// Create a new database client factory
    pub fn new() -> Self {
        Self
    }

    /// Create a new database client from an application configuration
    ///
    /// A missing `database` section falls back to the default local SQLite file.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    ///
    /// * The database URL is empty
    /// * The database connection fails
    pub async fn from_app_config(&self, config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");

        match config.database.as_ref() {
            Some(db_config) => self.from_db_config(db_config).await,
            None => {
                let db_config = DatabaseConfig::default();
                warn!(
                    "No database configuration found, using default {}",
                    db_config.url
                );
                self.from_db_config(&db_config).await
            }
        }
    }

    /// Create a new database client from a database configuration
    pub async fn from_db_config(&self, db_config: &DatabaseConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from database configuration");
        DbClient::from_config(db_config).await
    }

    /// Create a new database client from a database URL
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}

impl Default for DbClientFactory {
    fn default() -> Self {
        Self::new()
    }
}
