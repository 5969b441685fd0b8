//! Configuration loading and typed config structures for the People Registry.
//!
//! Configuration is optional. When present it lives in a YAML file
//! (`people-registry.yaml` in the working directory unless another path is
//! given). Command-line flags and their environment variables are applied on
//! top of whatever the file provides; see [`RegistryConfig::apply_cli`].

use std::path::{Path, PathBuf};

use registry_api::server::{DEFAULT_PORT, ServerConfig};
use registry_api::state::DEFAULT_MAX_BODY_BYTES;
use serde::Deserialize;

use crate::cli::Cli;

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "people-registry.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
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

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Listener and request limits.
    #[serde(default)]
    pub server: ServerSection,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RegistryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Resolve the configuration file and load it.
    ///
    /// An explicitly named file must exist. Without one, the default file is
    /// read if it is present in the working directory, otherwise built-in
    /// defaults are used. Returns the path that was actually read, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryConfig::from_file`] errors.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            Ok((Self::from_file(fallback)?, Some(fallback.to_path_buf())))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Overlay command-line (or environment) values onto the file values.
    #[must_use]
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        self
    }

    /// Listener settings for [`registry_api::start_server`].
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port. `0` lets the OS choose.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest request body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
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
    ServerConfig::default().host
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_log_level() -> String {
    "info".to_owned()
}
