// --- File: crates/washbook_booking/src/routes.rs ---

use axum::{routing::get, Router};
use std::sync::Arc;
use washbook_common::services::SharedCalendarService;
use washbook_config::AppConfig;
use washbook_db::SqlBookingRepository;

use crate::error::BookingError;
use crate::handlers::{health_handler, index_handler, submit_handler, BookingState};
use crate::mirror::CalendarMirror;
use crate::service::BookingService;

/// Builds the booking state from the configuration and its collaborators.
pub fn booking_state(
    config: Arc<AppConfig>,
    repository: SqlBookingRepository,
    calendar: Option<SharedCalendarService>,
) -> Result<Arc<BookingState>, BookingError> {
    let mirror = CalendarMirror::from_config(calendar, &config)?;
    let service = BookingService::new(repository, mirror, config.booking.clone());
    Ok(Arc::new(BookingState { config, service }))
}

/// Creates a router containing all routes of the booking form.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
