// --- File: crates/washbook_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod service;

pub use auth::{create_calendar_hub, HubType};
pub use service::{to_google_event, GcalServiceError, GoogleCalendarService};
