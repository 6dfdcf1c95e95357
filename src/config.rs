//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines
//! constants for default paths, bind address, logging, and shutdown timing.
//! `AppConfig` is the root configuration struct; the environment and CLI are
//! resolved by the caller (see `main.rs`) so the core only ever sees
//! already-resolved values.

use serde::Deserialize;
use std::path::Path;
use tracing::Level;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default bind address (all interfaces, for containerized deployment)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Health responses must never be served stale by an intermediary cache;
/// a cached liveness answer defeats the probe.
pub const CACHE_CONTROL_HEALTH: &str = "no-cache, no-store";

// =============================================================================
// Shutdown Timing
// =============================================================================

/// Maximum seconds to wait for in-flight requests to drain during shutdown
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to built-in defaults
    /// if the file does not exist. The service must run with zero config, so
    /// a missing file is not an error; an unreadable or malformed file is.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}

/// Resolve a requested log level to a concrete severity.
///
/// Accepts the standard severity names (`trace`, `debug`, `info`, `warn`,
/// `error`, case-insensitive). An absent or unrecognized value resolves to
/// `info` rather than failing startup: a liveness service should come up even
/// when `LOG_LEVEL` is misconfigured. The second element is true when a value
/// was supplied but not recognized, so the caller can warn once logging is up.
pub fn resolve_log_level(requested: Option<&str>) -> (Level, bool) {
    match requested {
        None => (Level::INFO, false),
        Some(v) => match v.trim().parse::<Level>() {
            Ok(level) => (level, false),
            Err(_) => (Level::INFO, true),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = AppConfig::load_or_default("/nonexistent/pulse.toml").unwrap();
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.http.port, DEFAULT_PORT);
        assert_eq!(config.logging.format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: AppConfig = toml::from_str("[http]\nport = 9090\n").unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.logging.format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[http]\nhost = \"127.0.0.1\"\nport = 3000\n\n[logging]\nformat = \"json\"\n"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[http\nport = not a port").unwrap();

        assert!(matches!(
            AppConfig::load_or_default(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn log_level_accepts_standard_severity_names() {
        assert_eq!(resolve_log_level(Some("debug")), (Level::DEBUG, false));
        assert_eq!(resolve_log_level(Some("WARN")), (Level::WARN, false));
        assert_eq!(resolve_log_level(Some(" error ")), (Level::ERROR, false));
    }

    #[test]
    fn log_level_defaults_to_info_when_absent() {
        assert_eq!(resolve_log_level(None), (Level::INFO, false));
    }

    #[test]
    fn unrecognized_log_level_falls_back_to_info_and_flags_it() {
        assert_eq!(resolve_log_level(Some("verbose")), (Level::INFO, true));
        assert_eq!(resolve_log_level(Some("")), (Level::INFO, true));
    }
}
