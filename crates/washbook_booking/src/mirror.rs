// --- File: crates/washbook_booking/src/mirror.rs ---
//! Best-effort replication of stored bookings into an external calendar.

use chrono::{Duration, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use tracing::{debug, info, warn};
use washbook_common::models::Booking;
use washbook_common::services::{CalendarEvent, SharedCalendarService};
use washbook_config::{AppConfig, GcalConfig};

use crate::error::BookingError;

/// How mirroring one booking went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorStatus {
    Mirrored,
    /// A calendar is configured but the event could not be created
    NotMirrored,
    /// No calendar is configured
    Disabled,
}

/// Creates one calendar event per stored booking.
#[derive(Clone)]
pub struct CalendarMirror {
    calendar: Option<SharedCalendarService>,
    calendar_id: String,
    time_zone: Tz,
    duration: Duration,
}

impl fmt::Debug for CalendarMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarMirror")
            .field("enabled", &self.calendar.is_some())
            .field("calendar_id", &self.calendar_id)
            .field("time_zone", &self.time_zone)
            .field("duration", &self.duration)
            .finish()
    }
}

impl CalendarMirror {
    pub fn new(
        calendar: SharedCalendarService,
        calendar_id: impl Into<String>,
        time_zone: Tz,
        duration: Duration,
    ) -> Self {
        Self {
            calendar: Some(calendar),
            calendar_id: calendar_id.into(),
            time_zone,
            duration,
        }
    }

    /// A mirror that never calls out and reports [`MirrorStatus::Disabled`].
    pub fn disabled() -> Self {
        Self {
            calendar: None,
            calendar_id: String::new(),
            time_zone: chrono_tz::America::Sao_Paulo,
            duration: Duration::minutes(GcalConfig::DEFAULT_EVENT_DURATION_MINUTES),
        }
    }

    /// Builds the mirror from the `gcal` section.
    ///
    /// Without a calendar service the mirror is disabled. With one, the section
    /// must name a calendar id and a valid IANA time zone.
    pub fn from_config(
        calendar: Option<SharedCalendarService>,
        config: &AppConfig,
    ) -> Result<Self, BookingError> {
        let Some(calendar) = calendar else {
            info!("Calendar mirroring disabled");
            return Ok(Self::disabled());
        };

        let gcal = config.gcal.as_ref().ok_or_else(|| {
            BookingError::Config("calendar service configured without a gcal section".to_string())
        })?;
        let calendar_id = gcal
            .calendar_id
            .as_deref()
            .ok_or_else(|| BookingError::Config("gcal.calendar_id is missing".to_string()))?;
        let time_zone: Tz = gcal.time_zone().parse().map_err(|e| {
            BookingError::Config(format!("invalid gcal.time_zone {:?}: {}", gcal.time_zone(), e))
        })?;

        info!(
            "Calendar mirroring enabled for {} ({})",
            calendar_id, time_zone
        );
        Ok(Self::new(
            calendar,
            calendar_id,
            time_zone,
            Duration::minutes(gcal.event_duration_minutes()),
        ))
    }

    pub fn is_enabled(&self) -> bool {
        self.calendar.is_some()
    }

    /// The event a booking is mirrored as, or `None` if its slot does not
    /// exist as a local time (e.g. skipped by a DST change).
    pub fn event_for(&self, booking: &Booking) -> Option<CalendarEvent> {
        let start = self
            .time_zone
            .from_local_datetime(&booking.scheduled_at)
            .earliest()?;
        let end = start + self.duration;

        Some(CalendarEvent {
            start_time: start.to_rfc3339(),
            end_time: end.to_rfc3339(),
            time_zone: self.time_zone.name().to_string(),
            summary: format!("{} - {}", booking.service, booking.plate),
            description: Some(format!(
                "Cliente: {}\nTipo de Veículo: {}\nPlaca: {}",
                booking.client_name, booking.vehicle_type, booking.plate
            )),
        })
    }

    /// Creates the calendar event for `booking`. Called once per booking; never fails.
    pub async fn mirror(&self, booking: &Booking) -> MirrorStatus {
        let Some(calendar) = self.calendar.as_ref() else {
            return MirrorStatus::Disabled;
        };

        let Some(event) = self.event_for(booking) else {
            warn!(
                "Booking {} slot {} does not exist in {}, not mirrored",
                booking.id, booking.scheduled_at, self.time_zone
            );
            return MirrorStatus::NotMirrored;
        };

        debug!("Mirroring booking {} to {}", booking.id, self.calendar_id);
        match calendar.create_event(&self.calendar_id, event).await {
            Ok(result) => {
                info!(
                    "Booking {} mirrored as event {:?} ({})",
                    booking.id, result.event_id, result.status
                );
                MirrorStatus::Mirrored
            }
            Err(e) => {
                warn!("Failed to mirror booking {}: {}", booking.id, e);
                MirrorStatus::NotMirrored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use washbook_common::services::{
        BoxFuture, BoxedError, CalendarEventResult, CalendarService,
    };

    #[derive(Default)]
    struct RecordingCalendar {
        fail: bool,
        calls: Mutex<Vec<(String, CalendarEvent)>>,
    }

    impl CalendarService for RecordingCalendar {
        type Error = BoxedError;

        fn create_event(
            &self,
            calendar_id: &str,
            event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            self.calls
                .lock()
                .unwrap()
                .push((calendar_id.to_string(), event));
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(BoxedError::new(std::io::Error::other("calendar down")))
                } else {
                    Ok(CalendarEventResult {
                        event_id: Some("evt-1".to_string()),
                        status: "confirmed".to_string(),
                    })
                }
            })
        }
    }

    fn booking() -> Booking {
        Booking {
            id: 1,
            client_name: "Ana".to_string(),
            plate: "ABC1D23".to_string(),
            vehicle_type: "Carro".to_string(),
            service: "Polimento".to_string(),
            scheduled_at: NaiveDate::from_ymd_opt(2025, 5, 2)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    fn mirror_with(calendar: Arc<RecordingCalendar>) -> CalendarMirror {
        CalendarMirror::new(
            calendar,
            "shop@group.calendar.google.com",
            chrono_tz::America::Sao_Paulo,
            Duration::minutes(60),
        )
    }

    #[tokio::test]
    async fn test_disabled_mirror_reports_disabled() {
        assert_eq!(
            CalendarMirror::disabled().mirror(&booking()).await,
            MirrorStatus::Disabled
        );
    }

    #[tokio::test]
    async fn test_mirror_creates_one_hour_local_event() {
        let calendar = Arc::new(RecordingCalendar::default());
        let status = mirror_with(calendar.clone()).mirror(&booking()).await;
        assert_eq!(status, MirrorStatus::Mirrored);

        let calls = calendar.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (calendar_id, event) = &calls[0];
        assert_eq!(calendar_id, "shop@group.calendar.google.com");
        assert_eq!(event.start_time, "2025-05-02T10:00:00-03:00");
        assert_eq!(event.end_time, "2025-05-02T11:00:00-03:00");
        assert_eq!(event.time_zone, "America/Sao_Paulo");
        assert_eq!(event.summary, "Polimento - ABC1D23");
        assert!(event.description.as_deref().unwrap_or_default().contains("Ana"));
    }

    #[tokio::test]
    async fn test_calendar_error_degrades_to_not_mirrored() {
        let calendar = Arc::new(RecordingCalendar {
            fail: true,
            ..Default::default()
        });
        let status = mirror_with(calendar.clone()).mirror(&booking()).await;
        assert_eq!(status, MirrorStatus::NotMirrored);
        assert_eq!(calendar.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_from_config_without_calendar_is_disabled() {
        let mirror = CalendarMirror::from_config(None, &AppConfig::default()).unwrap();
        assert!(!mirror.is_enabled());
    }

    #[test]
    fn test_from_config_requires_calendar_id() {
        let config = AppConfig {
            use_gcal: true,
            gcal: Some(GcalConfig::default()),
            ..Default::default()
        };
        let calendar: SharedCalendarService = Arc::new(RecordingCalendar::default());
        let err = CalendarMirror::from_config(Some(calendar), &config).unwrap_err();
        assert!(matches!(err, BookingError::Config(_)));
    }

    #[test]
    fn test_from_config_rejects_unknown_time_zone() {
        let config = AppConfig {
            use_gcal: true,
            gcal: Some(GcalConfig {
                calendar_id: Some("primary".to_string()),
                time_zone: Some("Mars/Olympus_Mons".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let calendar: SharedCalendarService = Arc::new(RecordingCalendar::default());
        assert!(CalendarMirror::from_config(Some(calendar), &config).is_err());
    }
}
