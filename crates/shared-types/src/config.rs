use serde::{Deserialize, Serialize};

use crate::common::{normalize_pagination, DEFAULT_PAGE_SIZE};
use crate::page::Page;

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl ApiSettings {
    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }

    /// Page size clamped to what the backend accepts.
    pub fn effective_page_size(&self) -> i64 {
        normalize_pagination(None, Some(self.page_size)).1
    }
}

/// Feature flags controlling optional areas of the client.
///
/// Every field defaults to `false` so that a missing or incomplete config
/// file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub organizations: bool,
    #[serde(default)]
    pub qr_attendance: bool,
}

impl FeatureFlags {
    /// Whether a page is switched on. Pages outside a flagged area are
    /// always enabled.
    pub fn page_enabled(&self, page: Page) -> bool {
        if page.is_organization_area() {
            return self.organizations;
        }
        if page == Page::QrAttendance {
            return self.qr_attendance;
        }
        true
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Parse a config file, falling back to defaults if it cannot be parsed.
    /// The parse error, if any, is returned alongside so the caller can log it.
    pub fn from_toml_or_default(contents: &str) -> (Self, Option<String>) {
        match toml::from_str::<AppConfig>(contents) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e.to_string())),
        }
    }

    /// Apply a base URL override (e.g. from a build-time env var). Blank
    /// overrides are ignored.
    pub fn with_base_url_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self
    }
}
