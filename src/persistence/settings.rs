use std::{
    path::Path,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    load_json_or_default_in,
    SETTINGS_FILE,
};
use crate::api::DEFAULT_API_URL;

pub const API_URL_ENV: &str = "GAKU_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub api_url: String,
    pub session_poll_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub zoom: f32,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_poll_secs: 60,
            request_timeout_secs: None,
            zoom: 1.25,
        }
    }
}

impl SettingsData {
    /// Loads `settings.json` from `dir` and applies the environment override.
    pub fn load(dir: &Path) -> Self {
        let settings: SettingsData = load_json_or_default_in(dir, SETTINGS_FILE);
        settings.with_api_override(std::env::var(API_URL_ENV).ok())
    }

    pub fn with_api_override(self, api_url: Option<String>) -> Self {
        let api_url = match api_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.api_url,
        };
        Self { api_url: api_url.trim().trim_end_matches('/').to_string(), ..self }
    }

    pub fn session_poll_interval(&self) -> Duration {
        Duration::from_secs(self.session_poll_secs.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
