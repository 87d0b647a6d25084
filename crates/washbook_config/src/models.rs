// --- File: crates/washbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://database.db, loaded via WASHBOOK__DATABASE__URL or DATABASE_URL
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database.db".to_string(),
        }
    }
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub key_path: Option<String>,    // Mandatory when use_gcal is set
    pub calendar_id: Option<String>, // Mandatory when use_gcal is set
    pub time_zone: Option<String>,   // IANA name, defaults to America/Sao_Paulo
    pub event_duration_minutes: Option<i64>, // defaults to 60
}

impl GcalConfig {
    pub const DEFAULT_TIME_ZONE: &'static str = "America/Sao_Paulo";
    pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

    pub fn time_zone(&self) -> &str {
        self.time_zone.as_deref().unwrap_or(Self::DEFAULT_TIME_ZONE)
    }

    pub fn event_duration_minutes(&self) -> i64 {
        self.event_duration_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(Self::DEFAULT_EVENT_DURATION_MINUTES)
    }
}

// --- Booking Form Config ---
/// Everything the booking form and the hand-off message need that is fixed per shop.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Destination number for the wa.me hand-off link (country code + area code + number).
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    /// Format of the `data_hora_input` form field (HTML datetime-local).
    #[serde(default = "default_input_format")]
    pub input_format: String,
    /// Format a slot is persisted and displayed in. Must stay minute-granular.
    #[serde(default = "default_slot_format")]
    pub slot_format: String,
    #[serde(default = "default_shop_name")]
    pub shop_name: String,
    #[serde(default = "default_services")]
    pub services: Vec<String>,
    #[serde(default = "default_vehicle_types")]
    pub vehicle_types: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
            input_format: default_input_format(),
            slot_format: default_slot_format(),
            shop_name: default_shop_name(),
            services: default_services(),
            vehicle_types: default_vehicle_types(),
        }
    }
}

fn default_whatsapp_number() -> String {
    "5534974008823".to_string()
}

fn default_input_format() -> String {
    "%Y-%m-%dT%H:%M".to_string()
}

fn default_slot_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

fn default_shop_name() -> String {
    "Lava Jato".to_string()
}

fn default_services() -> Vec<String> {
    [
        "Lavagem Simples",
        "Lavagem Completa",
        "Lavagem + Cera",
        "Higienização Interna",
        "Polimento",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_vehicle_types() -> Vec<String> {
    ["Carro", "Moto", "SUV / Caminhonete", "Van"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error. Defaults to info.
    pub level: Option<String>,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,

    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
