// --- File: crates/services/washbook_backend/src/app_state.rs ---
use axum::Router;
use std::error::Error;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use washbook_booking::routes::{booking_state, routes};
use washbook_booking::BookingError;
use washbook_common::log_result;
use washbook_common::services::ServiceFactory;
use washbook_config::AppConfig;
use washbook_db::{
    BookingRepository, BookingRepositoryFactory, DbClientFactory, RepositoryFactory,
    SqlBookingRepository,
};

use crate::service_factory::WashbookServiceFactory;

/// Everything the server is built from, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: SqlBookingRepository,
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    /// Connects the database, prepares the schema and initializes external services.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let db_client = log_result(
            DbClientFactory::new().from_app_config(&config).await,
            "✅ Database connected.",
            "❌ Failed to connect to database",
        )?;

        let repository = BookingRepositoryFactory::new(&config.booking.slot_format)
            .create_repository(db_client);
        log_result(
            repository.init_schema().await,
            "✅ Booking schema ready.",
            "❌ Failed to initialize booking schema",
        )?;

        let service_factory: Arc<dyn ServiceFactory> =
            Arc::new(WashbookServiceFactory::new(config.clone()).await);

        Ok(Self {
            config,
            repository,
            service_factory,
        })
    }

    /// The application router with request tracing.
    pub fn router(&self) -> Result<Router, BookingError> {
        let state = booking_state(
            self.config.clone(),
            self.repository.clone(),
            self.service_factory.calendar_service(),
        )?;
        Ok(routes(state).layer(TraceLayer::new_for_http()))
    }
}
