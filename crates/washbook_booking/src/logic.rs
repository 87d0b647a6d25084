// --- File: crates/washbook_booking/src/logic.rs ---
//! Intake rules and hand-off message construction.
//!
//! Everything here is pure: parsing the submitted slot, turning the form into a
//! [`NewBooking`], and building the confirmation text and its wa.me link.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use washbook_common::models::{Booking, NewBooking};
use washbook_config::BookingConfig;

use crate::mirror::MirrorStatus;

/// First line of every confirmation message.
pub const MESSAGE_HEADER: &str = "✅ NOVO AGENDAMENTO SITE!";
/// Status line when the booking reached the calendar.
pub const MIRRORED_LINE: &str = "📅 Agendamento confirmado na agenda.";
/// Status line when the booking is stored but the calendar call failed.
pub const NOT_MIRRORED_LINE: &str = "⚠️ Agendamento registrado, mas não sincronizado com a agenda.";

const HANDOFF_BASE_URL: &str = "https://wa.me";

/// The booking form as submitted (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingForm {
    pub cliente: String,
    pub placa: String,
    pub tipo_veiculo: String,
    pub servico: String,
    /// `YYYY-MM-DDTHH:MM`, as sent by a datetime-local input
    pub data_hora_input: String,
}

impl BookingForm {
    /// Turns the form into a booking for `scheduled_at`. Only the plate is normalized.
    pub fn into_new_booking(self, scheduled_at: NaiveDateTime) -> NewBooking {
        NewBooking::new(
            self.cliente,
            &self.placa,
            self.tipo_veiculo,
            self.servico,
            scheduled_at,
        )
    }
}

/// Result of parsing the submitted slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotParse {
    Parsed(NaiveDateTime),
    InvalidFormat,
}

/// Parses `input` with `input_format` (normally `%Y-%m-%dT%H:%M`).
///
/// Seconds are dropped so slots stay minute-granular.
pub fn parse_slot(input: &str, input_format: &str) -> SlotParse {
    match NaiveDateTime::parse_from_str(input, input_format) {
        Ok(parsed) => match parsed.with_second(0).and_then(|dt| dt.with_nanosecond(0)) {
            Some(slot) => SlotParse::Parsed(slot),
            None => SlotParse::InvalidFormat,
        },
        Err(_) => SlotParse::InvalidFormat,
    }
}

/// What the visitor is sent off with after a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub booking: Booking,
    pub mirror: MirrorStatus,
    pub message: String,
    pub handoff_url: String,
}

/// Outcome of one booking submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// Stored; redirect to `handoff_url`
    Confirmed(Confirmation),
    /// The slot did not parse; nothing stored
    InvalidFormat,
    /// The slot is already booked; nothing stored
    Conflict,
}

/// Builds the confirmation text sent through WhatsApp.
///
/// The status line is only present when calendar mirroring is enabled.
pub fn build_confirmation_message(
    booking: &Booking,
    mirror: MirrorStatus,
    config: &BookingConfig,
) -> String {
    let body = format!(
        "{}\n\nCliente: {}\nTipo de Veículo: {}\nPlaca: {}\nServiço Escolhido: {}\nData/Hora: {}",
        MESSAGE_HEADER,
        booking.client_name,
        booking.vehicle_type,
        booking.plate,
        booking.service,
        booking.slot_label(&config.slot_format),
    );

    match mirror {
        MirrorStatus::Mirrored => format!("{}\n\n{}", MIRRORED_LINE, body),
        MirrorStatus::NotMirrored => format!("{}\n\n{}", NOT_MIRRORED_LINE, body),
        MirrorStatus::Disabled => body,
    }
}

/// `https://wa.me/<number>?text=<percent-encoded message>`
pub fn build_handoff_url(number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        HANDOFF_BASE_URL,
        number,
        urlencoding::encode(message)
    )
}
