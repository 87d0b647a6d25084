// --- File: crates/washbook_common/src/models.rs ---

// Data structures shared between the store, the booking logic and the view.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A persisted appointment.
///
/// `scheduled_at` is the slot: no two bookings share it. It is a wall-clock time
/// in the shop's time zone, kept at minute granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Assigned by the store on insert
    pub id: i64,
    pub client_name: String,
    /// Always upper case
    pub plate: String,
    pub vehicle_type: String,
    pub service: String,
    pub scheduled_at: NaiveDateTime,
}

impl Booking {
    /// Formats the slot with the given chrono format string (e.g. `%d/%m/%Y %H:%M`).
    pub fn slot_label(&self, slot_format: &str) -> String {
        self.scheduled_at.format(slot_format).to_string()
    }
}

/// A booking that has passed intake but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub client_name: String,
    pub plate: String,
    pub vehicle_type: String,
    pub service: String,
    pub scheduled_at: NaiveDateTime,
}

impl NewBooking {
    /// Create a new booking from raw form values.
    ///
    /// The plate is normalized to upper case. Nothing is trimmed and empty
    /// values are kept as they are.
    pub fn new(
        client_name: impl Into<String>,
        plate: &str,
        vehicle_type: impl Into<String>,
        service: impl Into<String>,
        scheduled_at: NaiveDateTime,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            plate: plate.to_uppercase(),
            vehicle_type: vehicle_type.into(),
            service: service.into(),
            scheduled_at,
        }
    }

    /// Attach the store-assigned id.
    pub fn with_id(self, id: i64) -> Booking {
        Booking {
            id,
            client_name: self.client_name,
            plate: self.plate,
            vehicle_type: self.vehicle_type,
            service: self.service,
            scheduled_at: self.scheduled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_new_booking_uppercases_plate_only() {
        let booking = NewBooking::new("ana souza", "abc1d23", "carro", "Polimento", slot());
        assert_eq!(booking.plate, "ABC1D23");
        assert_eq!(booking.client_name, "ana souza");
        assert_eq!(booking.vehicle_type, "carro");
    }

    #[test]
    fn test_empty_values_are_kept() {
        let booking = NewBooking::new("", " ", "", "", slot());
        assert_eq!(booking.client_name, "");
        assert_eq!(booking.plate, " ");
    }

    #[test]
    fn test_slot_label_is_zero_padded() {
        let booking = NewBooking::new("Ana", "abc", "Carro", "Polimento", slot()).with_id(1);
        assert_eq!(booking.slot_label("%d/%m/%Y %H:%M"), "07/03/2025 09:05");
    }
}
