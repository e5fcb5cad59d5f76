//! Server configuration
//!
//! Read once at startup from environment variables:
//! - `PORT` (default 8080)
//! - `KAIZEN_DB_PATH` (default `kaizen.db`)
//! - `KAIZEN_LOG_DIR` (default `logs`)
//! - `KAIZEN_CORS`: `open` or `simple` (default `open`)
//! - `NODE_ENV=development` or `FUNCTIONS_EMULATOR=true` flag development mode

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use axum::http::{HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Origin allowed by `simple` CORS in development mode
pub const DEV_ORIGIN: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("Invalid KAIZEN_CORS value: {0} (expected `open` or `simple`)")]
    InvalidCorsMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorsMode {
    /// Any origin, echoed back
    #[default]
    Open,
    /// Only the local dev origin, and only in development mode
    Simple,
}

impl FromStr for CorsMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(CorsMode::Open),
            "simple" => Ok(CorsMode::Simple),
            _ => Err(ConfigError::InvalidCorsMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub cors: CorsMode,
    pub development: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("kaizen.db"),
            log_dir: PathBuf::from("logs"),
            cors: CorsMode::Open,
            development: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(path) = lookup("KAIZEN_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("KAIZEN_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(mode) = lookup("KAIZEN_CORS") {
            config.cors = mode.parse()?;
        }
        config.development = lookup("NODE_ENV").as_deref() == Some("development")
            || lookup("FUNCTIONS_EMULATOR").as_deref() == Some("true");

        Ok(config)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_cors(mut self, cors: CorsMode) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// CORS layer for the router; `None` means no cross-origin access
    pub fn cors_layer(&self) -> Option<CorsLayer> {
        let methods = [Method::GET, Method::HEAD, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];
        match (self.cors, self.development) {
            (CorsMode::Open, _) => Some(
                CorsLayer::new()
                    .allow_origin(AllowOrigin::mirror_request())
                    .allow_methods(methods)
                    .allow_headers(AllowHeaders::mirror_request()),
            ),
            (CorsMode::Simple, true) => Some(
                CorsLayer::new()
                    .allow_origin(HeaderValue::from_static(DEV_ORIGIN))
                    .allow_methods(methods)
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true),
            ),
            (CorsMode::Simple, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr().port(), 8080);
    }

    #[test]
    fn test_reads_all_keys() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "5001"),
            ("KAIZEN_DB_PATH", "/tmp/k.db"),
            ("KAIZEN_LOG_DIR", "/tmp/logs"),
            ("KAIZEN_CORS", "Simple"),
            ("NODE_ENV", "development"),
        ]))
        .unwrap();

        assert_eq!(config.port, 5001);
        assert_eq!(config.db_path, PathBuf::from("/tmp/k.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.cors, CorsMode::Simple);
        assert!(config.development);
    }

    #[test]
    fn test_emulator_flags_development() {
        let config = Config::from_lookup(lookup_from(&[("FUNCTIONS_EMULATOR", "true")])).unwrap();
        assert!(config.development);

        let config = Config::from_lookup(lookup_from(&[("NODE_ENV", "production")])).unwrap();
        assert!(!config.development);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("eighty".to_string()));

        let err = Config::from_lookup(lookup_from(&[("KAIZEN_CORS", "strict")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidCorsMode("strict".to_string()));
    }

    #[test]
    fn test_cors_layer_per_mode() {
        assert!(Config::default().cors_layer().is_some());
        assert!(Config::default().with_cors(CorsMode::Simple).cors_layer().is_none());
        assert!(Config::default()
            .with_cors(CorsMode::Simple)
            .with_development(true)
            .cors_layer()
            .is_some());
    }
}
