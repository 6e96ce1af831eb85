use serde::Deserialize;

/// voicedrop runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Directory where uploaded audio is stored
    pub storage_dir: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            storage_dir: "/app/uploads".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("VOICEDROP_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("VOICEDROP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            storage_dir: std::env::var("VOICEDROP_STORAGE_DIR")
                .unwrap_or_else(|_| "/app/uploads".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
