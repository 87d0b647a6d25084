// File: crates/washbook_booking/src/handlers.rs
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use washbook_common::WashbookError;
use washbook_config::AppConfig;
use washbook_db::SqlBookingRepository;

use crate::logic::{BookingForm, IntakeOutcome};
use crate::service::BookingService;
use crate::view::render_index;

// Shared state for the booking handlers
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub service: BookingService<SqlBookingRepository>,
}

async fn index_page(state: &BookingState) -> Result<Html<String>, WashbookError> {
    let bookings = state.service.list_bookings().await?;
    Ok(Html(render_index(&bookings, state.service.config())))
}

/// Shows the booking form and all bookings.
#[axum::debug_handler]
pub async fn index_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Html<String>, WashbookError> {
    index_page(&state).await
}

/// Accepts a booking. Redirects to the WhatsApp hand-off on success and
/// shows the index again when the slot is invalid or taken.
#[axum::debug_handler]
pub async fn submit_handler(
    State(state): State<Arc<BookingState>>,
    Form(form): Form<BookingForm>,
) -> Result<Response, WashbookError> {
    match state.service.intake(form).await? {
        IntakeOutcome::Confirmed(confirmation) => {
            info!("Handing off booking {}", confirmation.booking.id);
            Ok(Redirect::to(&confirmation.handoff_url).into_response())
        }
        IntakeOutcome::InvalidFormat | IntakeOutcome::Conflict => {
            Ok(index_page(&state).await?.into_response())
        }
    }
}

/// Liveness plus a database round trip.
#[axum::debug_handler]
pub async fn health_handler(State(state): State<Arc<BookingState>>) -> Json<Value> {
    let database = state.service.repository().db_client().is_healthy().await;
    Json(json!({ "status": "ok", "database": database }))
}
