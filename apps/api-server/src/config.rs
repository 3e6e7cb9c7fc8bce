//! Centralized configuration for api-server.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than at request time.

use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Storage backend provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageProvider {
    /// In-memory storage seeded with sample postings (data lost on restart)
    Memory,
    /// SQLite file-based storage
    Sqlite,
}

impl StorageProvider {
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(unknown_value("STORAGE_PROVIDER", s, "memory, sqlite")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(unknown_value("LOG_FORMAT", s, "pretty, json")),
        }
    }
}

/// How the HTTP layer reports missing postings and bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Missing id on get yields `null`; update/delete always succeed; no validation.
    Lenient,
    /// Missing id yields 404; invalid postings yield 400.
    Strict,
}

impl ErrorMode {
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(unknown_value("ERROR_MODE", s, "lenient, strict")),
        }
    }
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error for {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

fn unknown_value(field: &'static str, raw: &str, expected: &str) -> ConfigError {
    ConfigError {
        field,
        message: format!("Unknown value '{}' (expected one of: {})", raw, expected),
    }
}

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_DB_PATH: &str = "./data/jobs.db";

/// Server configuration loaded from environment variables.
///
/// All fields are validated at construction time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 8080)
    pub port: u16,
    /// CORS allowed origins
    pub cors_origins: CorsOrigins,
    /// Storage provider
    pub storage_provider: StorageProvider,
    /// SQLite database path (when using sqlite storage)
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub db_path: PathBuf,
    /// Log format
    pub log_format: LogFormat,
    /// Not-found / validation policy
    pub error_mode: ErrorMode,
    /// Seed an empty SQLite store with the sample postings at startup
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub seed_on_start: bool,
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// Fails fast on invalid configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Port
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError {
                field: "PORT",
                message: format!("Invalid port '{}': {}", raw, e),
            })?,
            None => DEFAULT_PORT,
        };

        // CORS allow origins
        let cors_raw = lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());
        let cors_origins = parse_cors_origins(&cors_raw)?;

        // Storage provider
        let storage_provider = match lookup("STORAGE_PROVIDER").filter(|s| !s.trim().is_empty()) {
            Some(raw) => StorageProvider::from_str(&raw)?,
            None => StorageProvider::Memory,
        };
        if storage_provider == StorageProvider::Sqlite && !cfg!(feature = "sqlite") {
            return Err(ConfigError {
                field: "STORAGE_PROVIDER",
                message: "sqlite storage requires the `sqlite` feature".into(),
            });
        }

        // DB path (for sqlite)
        let db_path = lookup("DB_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        // Log format
        let log_format = match lookup("LOG_FORMAT").filter(|s| !s.trim().is_empty()) {
            Some(raw) => LogFormat::from_str(&raw)?,
            None => LogFormat::Pretty,
        };

        // Error mode
        let error_mode = match lookup("ERROR_MODE").filter(|s| !s.trim().is_empty()) {
            Some(raw) => ErrorMode::from_str(&raw)?,
            None => ErrorMode::Lenient,
        };

        let seed_on_start = lookup("SEED_ON_START")
            .map(|s| http_common::parse_bool_flag(&s))
            .unwrap_or(false);

        Ok(Self {
            port,
            cors_origins,
            storage_provider,
            db_path,
            log_format,
            error_mode,
            seed_on_start,
        })
    }

    /// Log notes about permissive configuration.
    pub fn warn_if_permissive(&self) {
        if self.cors_origins == CorsOrigins::Any {
            tracing::warn!("CORS_ALLOW_ORIGIN=*: any origin may call the API.");
        }
        if self.storage_provider == StorageProvider::Memory {
            tracing::info!("STORAGE_PROVIDER=memory: postings are lost on restart.");
        }
    }
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    if raw.trim() == "*" {
        return Ok(CorsOrigins::Any);
    }
    let origins = http_common::split_csv(raw);
    if origins.is_empty() {
        return Err(ConfigError {
            field: "CORS_ALLOW_ORIGIN",
            message: "at least one origin (or *) is required".into(),
        });
    }
    origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| ConfigError {
                field: "CORS_ALLOW_ORIGIN",
                message: format!("Invalid header value '{}': {}", o, e),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn storage_provider_parsing() {
        assert_eq!(StorageProvider::from_str("memory").unwrap(), StorageProvider::Memory);
        assert_eq!(StorageProvider::from_str("sqlite").unwrap(), StorageProvider::Sqlite);
        assert_eq!(StorageProvider::from_str(" SQLITE ").unwrap(), StorageProvider::Sqlite);
        assert!(StorageProvider::from_str("anything").is_err());
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("anything").is_err());
    }

    #[test]
    fn error_mode_parsing() {
        assert_eq!(ErrorMode::from_str("strict").unwrap(), ErrorMode::Strict);
        assert_eq!(ErrorMode::from_str("STRICT").unwrap(), ErrorMode::Strict);
        assert_eq!(ErrorMode::from_str("lenient").unwrap(), ErrorMode::Lenient);
        assert!(ErrorMode::from_str("strcit").is_err());
    }

    #[test]
    fn unknown_enum_values_fail_fast() {
        let err = cfg_from(&[("STORAGE_PROVIDER", "sqlit")]).unwrap_err();
        assert_eq!(err.field, "STORAGE_PROVIDER");
        let err = cfg_from(&[("LOG_FORMAT", "jsn")]).unwrap_err();
        assert_eq!(err.field, "LOG_FORMAT");
        let err = cfg_from(&[("ERROR_MODE", "strcit")]).unwrap_err();
        assert_eq!(err.field, "ERROR_MODE");
        assert!(err.message.contains("strcit"));
    }

    #[test]
    fn empty_enum_values_use_defaults() {
        let cfg = cfg_from(&[("STORAGE_PROVIDER", ""), ("LOG_FORMAT", " "), ("ERROR_MODE", "")])
            .unwrap();
        assert_eq!(cfg.storage_provider, StorageProvider::Memory);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.error_mode, ErrorMode::Lenient);
    }

    #[test]
    fn defaults() {
        let cfg = cfg_from(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(
            cfg.cors_origins,
            CorsOrigins::List(vec![HeaderValue::from_static("http://localhost:3000")])
        );
        assert_eq!(cfg.storage_provider, StorageProvider::Memory);
        assert_eq!(cfg.db_path, PathBuf::from("./data/jobs.db"));
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.error_mode, ErrorMode::Lenient);
        assert!(!cfg.seed_on_start);
    }

    #[test]
    fn cors_wildcard_and_list() {
        let cfg = cfg_from(&[("CORS_ALLOW_ORIGIN", "*")]).unwrap();
        assert_eq!(cfg.cors_origins, CorsOrigins::Any);

        let cfg = cfg_from(&[("CORS_ALLOW_ORIGIN", "http://a.test, http://b.test")]).unwrap();
        match cfg.cors_origins {
            CorsOrigins::List(v) => assert_eq!(v.len(), 2),
            CorsOrigins::Any => panic!("expected list"),
        }

        let err = cfg_from(&[("CORS_ALLOW_ORIGIN", " , ")]).unwrap_err();
        assert_eq!(err.field, "CORS_ALLOW_ORIGIN");
    }

    #[test]
    fn bad_port_fails_fast() {
        let err = cfg_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.field, "PORT");
        let cfg = cfg_from(&[("PORT", "9090")]).unwrap();
        assert_eq!(cfg.port, 9090);
    }

    #[test]
    fn seed_flag_and_db_path() {
        let cfg = cfg_from(&[("SEED_ON_START", "true"), ("DB_PATH", "/tmp/j.db")]).unwrap();
        assert!(cfg.seed_on_start);
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/j.db"));
    }
}
