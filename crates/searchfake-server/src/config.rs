//! Configuration loading and typed config structures for the searchfake server.
//!
//! Configuration is a small YAML document (`searchfake.yaml` by
//! convention). Every field has a default, so an empty file, or no file
//! at all, yields a server on `127.0.0.1:9200` that identifies itself as
//! an 8.x cluster.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Host name or address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on. `0` picks an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Static metadata served by `GET /`.
    #[serde(default)]
    pub service: ServiceInfo,

    /// Logging settings (used by the standalone binary).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service: ServiceInfo::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// A config for tests: loopback address with an ephemeral port.
    pub fn ephemeral() -> Self {
        Self {
            port: 0,
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SEARCHFAKE_HOST` overrides `host`
    /// - `SEARCHFAKE_PORT` overrides `port`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, then apply environment overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `SEARCHFAKE_HOST` / `SEARCHFAKE_PORT` from the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SEARCHFAKE_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("SEARCHFAKE_PORT") {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(e) => warn!(value = %val, error = %e, "Ignoring invalid SEARCHFAKE_PORT"),
            }
        }
    }

    /// `host:port` as a display string.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Static cluster metadata reported by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceInfo {
    /// Node name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Cluster name.
    #[serde(default = "default_cluster_name")]
    pub cluster_name: String,

    /// Cluster UUID.
    #[serde(default = "default_cluster_uuid")]
    pub cluster_uuid: String,

    /// Reported backend version. Clients use it for compatibility checks.
    #[serde(default = "default_version")]
    pub version: String,

    /// Tagline.
    #[serde(default = "default_tagline")]
    pub tagline: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: default_name(),
            cluster_name: default_cluster_name(),
            cluster_uuid: default_cluster_uuid(),
            version: default_version(),
            tagline: default_tagline(),
        }
    }
}

impl ServiceInfo {
    /// The `GET /` response body.
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "cluster_name": self.cluster_name,
            "cluster_uuid": self.cluster_uuid,
            "version": {
                "number": self.version,
                "build_flavor": "default",
                "build_type": "docker",
                "lucene_version": "9.0.0",
                "minimum_wire_compatibility_version": "7.17.0",
                "minimum_index_compatibility_version": "7.0.0",
            },
            "tagline": self.tagline,
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    9200
}

fn default_name() -> String {
    String::from("searchfake")
}

fn default_cluster_name() -> String {
    String::from("searchfake-cluster")
}

fn default_cluster_uuid() -> String {
    String::from("fKg7K_YTQH6pG5-VzF7nZQ")
}

fn default_version() -> String {
    String::from("8.0.0")
}

fn default_tagline() -> String {
    String::from("You Know, for Search")
}

fn default_log_level() -> String {
    String::from("info")
}
