//! Server configuration.
//!
//! Sources are layered, later wins: built-in defaults, an optional TOML file,
//! then environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "COVERDESK_CONFIG";

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,

    /// Fallback `EnvFilter` directives when `RUST_LOG` is unset
    pub log_filter: String,

    /// Export spans over OTLP
    pub otel_enabled: bool,

    /// OTLP collector endpoint
    pub otel_endpoint: String,

    /// Fraction of traces to sample, clamped to [0, 1]
    pub otel_sample_rate: f64,

    /// Compress response bodies
    pub compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_filter: "info,coverdesk=debug".to_string(),
            otel_enabled: false,
            otel_endpoint: "http://localhost:4317".to_string(),
            otel_sample_rate: 1.0,
            compression: true,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ServerConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Resolve the full configuration.
    ///
    /// `path` takes precedence over `COVERDESK_CONFIG`; environment
    /// overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok();
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| env_path.map(Into::into));

        let cfg = match file {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };

        let cfg = cfg.with_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Some(enabled) = lookup("OTEL_ENABLED").and_then(|v| v.parse::<bool>().ok()) {
            self.otel_enabled = enabled;
        }
        if let Some(endpoint) = lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
            self.otel_endpoint = endpoint;
        }
        if let Some(rate) = lookup("OTEL_TRACES_SAMPLER_ARG").and_then(|v| v.parse::<f64>().ok()) {
            self.otel_sample_rate = rate;
        }
        self
    }

    /// Replace the port of the bind address, keeping the host
    pub fn with_port(mut self, port: u16) -> Result<Self, ConfigError> {
        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.bind_address = addr.to_string();
        Ok(self)
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                field: "bind_address",
                reason: e.to_string(),
            })
    }

    /// Check invariants not expressible in the schema
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if !self.otel_sample_rate.is_finite() {
            return Err(ConfigError::Invalid {
                field: "otel_sample_rate",
                reason: "must be a finite number".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_filter",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_address, "0.0.0.0:8000");
        assert_eq!(cfg.socket_addr().unwrap().port(), 8000);
        assert!(!cfg.otel_enabled);
        assert!(cfg.compression);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = ServerConfig::from_toml_str(r#"bind_address = "127.0.0.1:9000""#).unwrap();
        assert_eq!(cfg.bind_address, "127.0.0.1:9000");
        assert_eq!(cfg.log_filter, "info,coverdesk=debug");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ServerConfig::from_toml_str("listen = \"0.0.0.0:1\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_bind_address_rejected() {
        let err = ServerConfig::from_toml_str(r#"bind_address = "not an address""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "bind_address",
                ..
            }
        ));
    }

    #[test]
    fn test_nan_sample_rate_rejected() {
        let cfg = ServerConfig {
            otel_sample_rate: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("BIND_ADDRESS", "127.0.0.1:7000"),
            ("OTEL_ENABLED", "true"),
            ("OTEL_TRACES_SAMPLER_ARG", "0.25"),
        ]
        .into_iter()
        .collect();

        let cfg = ServerConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.bind_address, "127.0.0.1:7000");
        assert!(cfg.otel_enabled);
        assert_eq!(cfg.otel_sample_rate, 0.25);
        assert_eq!(cfg.otel_endpoint, "http://localhost:4317");
    }

    #[test]
    fn test_unparseable_overrides_ignored() {
        let cfg = ServerConfig::default().with_overrides(|k| match k {
            "OTEL_ENABLED" => Some("maybe".to_string()),
            "OTEL_TRACES_SAMPLER_ARG" => Some("lots".to_string()),
            _ => None,
        });
        assert!(!cfg.otel_enabled);
        assert_eq!(cfg.otel_sample_rate, 1.0);
    }

    #[test]
    fn test_with_port() {
        let cfg = ServerConfig::default().with_port(9100).unwrap();
        assert_eq!(cfg.bind_address, "0.0.0.0:9100");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "compression = false").unwrap();
        writeln!(file, "log_filter = \"warn\"").unwrap();

        let cfg = ServerConfig::from_file(file.path()).unwrap();
        assert!(!cfg.compression);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_file("/nonexistent/coverdesk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
