use std::sync::OnceLock;

use shared_types::AppConfig;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static PENDING_WARNING: OnceLock<String> = OnceLock::new();

const EMBEDDED: &str = include_str!("../config.toml");

/// Parse the embedded config and apply the build-time API URL override.
/// Call once at startup, before the logger is initialised.
pub fn load() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let (config, warning) = AppConfig::from_toml_or_default(EMBEDDED);
        if let Some(w) = warning {
            // Logged by main once the logger is up.
            let _ = PENDING_WARNING.set(w);
        }
        config.with_base_url_override(option_env!("LMS_API_URL"))
    })
}

/// The loaded configuration. Falls back to loading on first use.
pub fn get() -> &'static AppConfig {
    CONFIG.get().unwrap_or_else(load)
}

/// A config parse problem found before logging was available.
pub fn startup_warning() -> Option<&'static str> {
    PENDING_WARNING.get().map(String::as_str)
}

/// Map the configured level name to a tracing level, defaulting to INFO.
pub fn log_level(name: &str) -> tracing::Level {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
