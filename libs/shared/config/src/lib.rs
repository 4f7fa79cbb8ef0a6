use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_path: String,
    pub enforce_availability: bool,
}

pub const DEFAULT_STORAGE_PATH: &str = "bookings.json";

impl AppConfig {
    pub fn from_env() -> Self {
        let storage_path = env::var("MEDIBOOK_STORAGE_PATH")
            .unwrap_or_else(|_| {
                warn!("MEDIBOOK_STORAGE_PATH not set, using {}", DEFAULT_STORAGE_PATH);
                DEFAULT_STORAGE_PATH.to_string()
            });

        let enforce_availability = match env::var("MEDIBOOK_ENFORCE_AVAILABILITY") {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                warn!("MEDIBOOK_ENFORCE_AVAILABILITY is not a boolean, defaulting to true");
                true
            }),
            Err(_) => true,
        };

        Self {
            storage_path,
            enforce_availability,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            enforce_availability: true,
        }
    }
}
