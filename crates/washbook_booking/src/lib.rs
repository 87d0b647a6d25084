// --- File: crates/washbook_booking/src/lib.rs ---
// Declare modules within this crate
pub mod error;
pub mod handlers;
pub mod logic;
pub mod mirror;
pub mod routes;
pub mod service;
pub mod view;

pub use error::BookingError;
pub use logic::{
    build_confirmation_message, build_handoff_url, parse_slot, BookingForm, Confirmation,
    IntakeOutcome, SlotParse,
};
pub use mirror::{CalendarMirror, MirrorStatus};
pub use service::BookingService;
