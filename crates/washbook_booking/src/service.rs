// --- File: crates/washbook_booking/src/service.rs ---
//! The booking flow: parse, check, store, mirror, hand off.

use tracing::{debug, info, warn};
use washbook_common::models::Booking;
use washbook_config::BookingConfig;
use washbook_db::{BookingRepository, InsertOutcome};

use crate::error::BookingError;
use crate::logic::{
    build_confirmation_message, build_handoff_url, parse_slot, BookingForm, Confirmation,
    IntakeOutcome, SlotParse,
};
use crate::mirror::CalendarMirror;

/// Coordinates the booking store and the calendar mirror.
#[derive(Debug, Clone)]
pub struct BookingService<R> {
    repository: R,
    mirror: CalendarMirror,
    config: BookingConfig,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R, mirror: CalendarMirror, config: BookingConfig) -> Self {
        Self {
            repository,
            mirror,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Handles one form submission.
    ///
    /// The slot is checked against the store before inserting, and the store's
    /// uniqueness constraint decides if another request took it in between.
    /// Mirroring runs after the booking is stored and never undoes it.
    pub async fn intake(&self, form: BookingForm) -> Result<IntakeOutcome, BookingError> {
        let slot = match parse_slot(&form.data_hora_input, &self.config.input_format) {
            SlotParse::Parsed(slot) => slot,
            SlotParse::InvalidFormat => {
                debug!("Rejected booking with unparsable slot {:?}", form.data_hora_input);
                return Ok(IntakeOutcome::InvalidFormat);
            }
        };

        let booking = {
            let mut conn = self.repository.acquire().await?;

            if let Some(existing) = self.repository.find_by_slot(&mut conn, slot).await? {
                warn!(
                    "Slot {} already booked by booking {}",
                    existing.slot_label(&self.config.slot_format),
                    existing.id
                );
                return Ok(IntakeOutcome::Conflict);
            }

            match self
                .repository
                .insert_booking(&mut conn, form.into_new_booking(slot))
                .await?
            {
                InsertOutcome::Inserted(booking) => booking,
                InsertOutcome::Conflict => return Ok(IntakeOutcome::Conflict),
            }
        };

        let mirror = self.mirror.mirror(&booking).await;
        let message = build_confirmation_message(&booking, mirror, &self.config);
        let handoff_url = build_handoff_url(&self.config.whatsapp_number, &message);

        info!(
            "Booking {} confirmed for {} ({:?})",
            booking.id,
            booking.slot_label(&self.config.slot_format),
            mirror
        );
        Ok(IntakeOutcome::Confirmed(Confirmation {
            booking,
            mirror,
            message,
            handoff_url,
        }))
    }

    /// All bookings, earliest slot first.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let mut conn = self.repository.acquire().await?;
        Ok(self.repository.list_bookings(&mut conn).await?)
    }
}
