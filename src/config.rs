use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Homeward";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default model for summary generation.
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4";

/// Sampling temperature for summary generation.
pub const GENERATION_TEMPERATURE: f32 = 0.6;

/// Sampling temperature for classification and adjudication calls.
/// Deterministic output — these calls are parsed, not read.
pub const ANALYSIS_TEMPERATURE: f32 = 0.0;

/// Default HTTP timeout for external generation calls, in seconds.
/// Generating a full letter can take tens of seconds on large models.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Homeward/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Homeward")
}

/// Get the patient records directory (per-patient JSON files)
pub fn records_dir() -> PathBuf {
    app_data_dir().join("records")
}

/// Get the logs directory (cycle and evaluation records, collaborator-owned)
pub fn logs_dir() -> PathBuf {
    app_data_dir().join("logs")
}

/// Connection settings for the external text-generation service.
///
/// Resolved once from the environment; the API key is never logged.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of an OpenAI-compatible chat-completions endpoint.
    pub base_url: String,
    /// Bearer token. Empty string means unauthenticated (local gateway).
    pub api_key: String,
    /// Model identifier for generation calls.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Read service settings from the environment, falling back to defaults.
    ///
    /// `HOMEWARD_API_BASE`, `HOMEWARD_API_KEY`, `HOMEWARD_MODEL`,
    /// `HOMEWARD_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("HOMEWARD_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            api_key: std::env::var("HOMEWARD_API_KEY").unwrap_or_default(),
            model: std::env::var("HOMEWARD_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            timeout_secs: std::env::var("HOMEWARD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}
