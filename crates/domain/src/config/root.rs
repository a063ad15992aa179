use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::mapping::HostMappings;
use super::resolution::ResolutionConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for wildns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening port and address
    #[serde(default)]
    pub server: ServerConfig,

    /// Fallback resolvers
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Wildcard domain and host mapping rules
    #[serde(default)]
    pub resolution: ResolutionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. wildns.toml in current directory
    /// 3. /etc/wildns/config.toml
    /// 4. Default configuration
    ///
    /// Command-line and environment overrides are applied on top.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("wildns.toml").exists() {
            Self::from_file("wildns.toml")?
        } else if std::path::Path::new("/etc/wildns/config.toml").exists() {
            Self::from_file("/etc/wildns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(domain) = overrides.wildcard_domain {
            self.resolution.wildcard_domain = domain;
        }
        if let Some(servers) = overrides.name_servers {
            self.upstream.set_from_list(&servers);
        }
        if let Some(path) = overrides.mapped_hosts {
            self.resolution.mapped_hosts = Some(path);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.debug {
            self.logging.debug = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.server.socket_addr()?;

        if self.resolution.wildcard_domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Wildcard domain cannot be empty".to_string(),
            ));
        }

        if self.resolution.max_chain_depth == 0 {
            return Err(ConfigError::Validation(
                "max_chain_depth must be at least 1".to_string(),
            ));
        }

        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        self.upstream.parsed_servers()?;
        Ok(())
    }

    /// Host mappings from the JSON file when one is configured and present,
    /// otherwise the inline `[[resolution.rules]]` tables.
    pub fn host_mappings(&self) -> Result<HostMappings, ConfigError> {
        if let Some(path) = &self.resolution.mapped_hosts {
            if let Some(mappings) = HostMappings::load(path)? {
                return Ok(mappings);
            }
        }
        Ok(self.resolution.inline_mappings())
    }
}

/// Command-line (and environment) overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub wildcard_domain: Option<String>,
    pub name_servers: Option<String>,
    pub mapped_hosts: Option<String>,
    pub log_level: Option<String>,
    pub debug: bool,
}
