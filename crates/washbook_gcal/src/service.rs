// --- File: crates/washbook_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventDateTime};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use washbook_common::services::{BoxFuture, CalendarEvent, CalendarEventResult, CalendarService};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

/// Converts a [`CalendarEvent`] into the Google API representation.
///
/// Start and end must be RFC 3339 and the event must end after it starts.
/// Both ends carry the event's time zone so the calendar shows local time.
pub fn to_google_event(event: &CalendarEvent) -> Result<Event, GcalServiceError> {
    let start_dt = parse_time(&event.start_time, "start_time")?;
    let end_dt = parse_time(&event.end_time, "end_time")?;

    if end_dt <= start_dt {
        return Err(GcalServiceError::CalculationError(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(Event {
        summary: Some(event.summary.clone()),
        description: event.description.clone(),
        start: Some(EventDateTime {
            date_time: Some(start_dt),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(end_dt),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn parse_time(value: &str, field: &str) -> Result<DateTime<Utc>, GcalServiceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid {}: {}", field, e)))
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = to_google_event(&event)?;
            debug!("Inserting event '{}' into {}", event.summary, calendar_id);

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            info!("Created calendar event {:?}", created_event.id);
            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}
