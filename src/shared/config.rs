//! Application configuration. Endpoint, demo mode, page behaviour.

use crate::usecases::PageSettings;
use serde::Deserialize;
use std::time::Duration;

/// Default analysis route of a locally running server.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";

/// Default time a notification stays on screen.
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Analysis endpoint URL. Read from EMAIL_TRIAGE_ENDPOINT.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Use the offline demo analyzer instead of HTTP. Read from EMAIL_TRIAGE_DEMO.
    #[serde(default)]
    pub demo: Option<bool>,

    /// Ignore submits while a request is in flight (default true). Read from
    /// EMAIL_TRIAGE_GUARD_IN_FLIGHT.
    #[serde(default)]
    pub guard_in_flight: Option<bool>,

    /// Notification display time in ms (default 3000). Read from EMAIL_TRIAGE_NOTIFICATION_MS.
    #[serde(default)]
    pub notification_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("EMAIL_TRIAGE").try_parsing(true));
        if let Ok(path) = std::env::var("EMAIL_TRIAGE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the endpoint URL. Defaults to the local server route.
    pub fn endpoint_or_default(&self) -> String {
        self.endpoint
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Returns true when the offline demo analyzer should be used.
    pub fn is_demo(&self) -> bool {
        self.demo.unwrap_or(false)
    }

    /// Returns the in-flight guard flag. Defaults to true.
    pub fn guard_in_flight_or_default(&self) -> bool {
        self.guard_in_flight.unwrap_or(true)
    }

    /// Returns notification display time in ms. Zero falls back to the default.
    pub fn notification_ms_or_default(&self) -> u64 {
        self.notification_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_NOTIFICATION_MS)
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            notification_ttl: Duration::from_millis(self.notification_ms_or_default()),
            guard_in_flight: self.guard_in_flight_or_default(),
        }
    }
}
