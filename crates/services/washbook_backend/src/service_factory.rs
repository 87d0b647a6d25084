// --- File: crates/services/washbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the external services enabled by configuration and feature flags and
//! hands them out type-erased through the `ServiceFactory` trait.

use std::sync::Arc;
#[allow(unused_imports)] // only used with the gcal feature
use {
    washbook_common::is_gcal_enabled,
    washbook_common::services::{
        BoxFuture, BoxedError, CalendarEvent, CalendarEventResult, CalendarService,
    },
    tracing::{error, info, warn},
};
use washbook_common::services::{ServiceFactory, SharedCalendarService};
use washbook_config::AppConfig;

#[cfg(feature = "gcal")]
use washbook_gcal::{auth::create_calendar_hub, service::GoogleCalendarService};

/// Adapts a calendar service with a concrete error type to [`BoxedError`].
pub struct BoxedCalendarService<S> {
    inner: S,
}

impl<S> BoxedCalendarService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: CalendarService> CalendarService for BoxedCalendarService<S> {
    type Error = BoxedError;

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_event(&calendar_id, event)
                .await
                .map_err(BoxedError::new)
        })
    }
}

/// Service factory for the Washbook backend.
pub struct WashbookServiceFactory {
    calendar_service: Option<SharedCalendarService>,
}

impl WashbookServiceFactory {
    /// Create a new service factory.
    ///
    /// A calendar that fails to initialize is logged and left out; bookings are
    /// then stored without mirroring.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            calendar_service: None,
        };

        #[cfg(feature = "gcal")]
        {
            if let Some(gcal_config) = config.gcal.as_ref().filter(|_| is_gcal_enabled(&config)) {
                info!("ℹ️ Initializing Google Calendar service...");
                match create_calendar_hub(gcal_config).await {
                    Ok(hub) => {
                        let service = GoogleCalendarService::new(Arc::new(hub));
                        factory.calendar_service =
                            Some(Arc::new(BoxedCalendarService::new(service)));
                        info!("✅ Google Calendar service initialized.");
                    }
                    Err(e) => {
                        error!("❌ Failed to initialize Google Calendar service: {}", e);
                    }
                }
            }
        }

        #[cfg(not(feature = "gcal"))]
        {
            if config.use_gcal {
                warn!("use_gcal is set but this build does not include the gcal feature");
            }
        }

        factory
    }
}

impl ServiceFactory for WashbookServiceFactory {
    fn calendar_service(&self) -> Option<SharedCalendarService> {
        self.calendar_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "calendar unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    struct DownCalendar;

    impl CalendarService for DownCalendar {
        type Error = Unavailable;

        fn create_event(
            &self,
            _calendar_id: &str,
            _event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            Box::pin(async { Err(Unavailable) })
        }
    }

    fn event() -> CalendarEvent {
        CalendarEvent {
            start_time: "2025-05-02T10:00:00-03:00".to_string(),
            end_time: "2025-05-02T11:00:00-03:00".to_string(),
            time_zone: "America/Sao_Paulo".to_string(),
            summary: "Polimento - ABC1D23".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_boxed_service_keeps_error_message() {
        let service: SharedCalendarService = Arc::new(BoxedCalendarService::new(DownCalendar));
        let err = service.create_event("primary", event()).await.unwrap_err();
        assert_eq!(err.to_string(), "calendar unavailable");
    }

    #[tokio::test]
    async fn test_factory_without_gcal_has_no_calendar() {
        let factory = WashbookServiceFactory::new(Arc::new(AppConfig::default())).await;
        assert!(factory.calendar_service().is_none());
    }
}
