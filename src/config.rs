//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::metrics::MetricsClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin metrics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Forwarded as the `Cookie` header
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            request_timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn client_config(&self) -> MetricsClientConfig {
        MetricsClientConfig {
            base_url: self.base_url.clone(),
            session_cookie: self.session_cookie.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Dashboard API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Socket address string to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reference data configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Reference tables to use instead of the embedded ones
    #[serde(default)]
    pub reference_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Nothing is logged here; call [`Discovered::report`] once a
    /// subscriber is installed.
    pub fn load_default() -> Discovered {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("ecodash").join("config.toml")),
            Some(PathBuf::from("/etc/ecodash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover(&config_paths, Self::load_with_env, Self::from_env)
    }

    /// First candidate that exists and parses wins; broken files are skipped
    fn discover<L, D>(paths: &[PathBuf], load: L, fallback: D) -> Discovered
    where
        L: Fn(&Path) -> Result<Config, ConfigError>,
        D: FnOnce() -> Config,
    {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match load(path.as_path()) {
                Ok(config) => {
                    return Discovered {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        Discovered {
            config: fallback(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Upstream overrides
        if let Some(url) = lookup("ECODASH_API_URL") {
            self.upstream.base_url = url;
        }
        if let Some(cookie) = lookup("ECODASH_SESSION_COOKIE") {
            self.upstream.session_cookie = Some(cookie);
        }

        // Server overrides
        if let Some(host) = lookup("ECODASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ECODASH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Data overrides
        if let Some(path) = lookup("ECODASH_REFERENCE_DATA") {
            self.data.reference_path = Some(path);
        }

        // Logging overrides
        if let Some(level) = lookup("ECODASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("ECODASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct Discovered {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

impl Discovered {
    /// Log where the config came from and every file that was skipped
    pub fn report(&self) {
        for error in &self.skipped {
            tracing::warn!("{}; falling back", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Ecodash Configuration
#
# Environment variables override these settings:
# - ECODASH_API_URL
# - ECODASH_SESSION_COOKIE
# - ECODASH_HOST
# - ECODASH_PORT
# - ECODASH_REFERENCE_DATA
# - ECODASH_LOG_LEVEL
# - ECODASH_LOG_FORMAT

[upstream]
# Admin metrics API base URL
base_url = "http://localhost:5000"

# Session cookie forwarded with each request
# session_cookie = "session=..."

# Request timeout in seconds (unset: no timeout)
# request_timeout_secs = 30

[server]
# Dashboard API host
host = "0.0.0.0"

# Dashboard API port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

[data]
# Reference tables to use instead of the built-in ones
# reference_path = "/etc/ecodash/reference.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.upstream.base_url, "http://localhost:5000");
        assert_eq!(config.server.addr(), "0.0.0.0:8090");
        assert!(config.data.reference_path.is_none());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.server.cors_origins.len(), 2);
        assert!(config.upstream.session_cookie.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[upstream]\nbase_url = \"https://admin.example.test\"\nrequest_timeout_secs = 5"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.upstream.base_url, "https://admin.example.test");
        assert_eq!(config.server.port, 8090);

        let client = config.upstream.client_config();
        assert_eq!(client.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/ecodash.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ECODASH_API_URL", "http://upstream:9000"),
            ("ECODASH_SESSION_COOKIE", "sid=1"),
            ("ECODASH_PORT", "not-a-number"),
            ("ECODASH_REFERENCE_DATA", "/tmp/ref.toml"),
            ("ECODASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.upstream.base_url, "http://upstream:9000");
        assert_eq!(config.upstream.session_cookie.as_deref(), Some("sid=1"));
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.data.reference_path.as_deref(), Some("/tmp/ref.toml"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_discover_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        let absent = dir.path().join("absent.toml");
        std::fs::write(&broken, "[server]\nport = \"not a port\"").unwrap();
        std::fs::write(&good, "[server]\nport = 9100").unwrap();

        let found = Config::discover(
            &[absent, broken.clone(), good.clone()],
            Config::load,
            Config::default,
        );
        assert_eq!(found.source.as_deref(), Some(good.as_path()));
        assert_eq!(found.config.server.port, 9100);
        assert_eq!(found.skipped.len(), 1);
        assert!(matches!(
            &found.skipped[0],
            ConfigError::Parse { path, .. } if path == &broken
        ));
    }

    #[test]
    fn test_discover_falls_back_with_errors_kept() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();

        let found = Config::discover(
            &[file.path().to_path_buf()],
            Config::load,
            Config::default,
        );
        assert!(found.source.is_none());
        assert_eq!(found.config.server.port, 8090);
        assert_eq!(found.skipped.len(), 1);
    }
}
