use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Shared by the UDP socket and the TCP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
        }
    }
}

impl ServerConfig {
    /// Listen address; IPv6 bind addresses may be given with or without brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self
            .bind_address
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']');
        let ip: IpAddr = host.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid bind address '{}'", self.bind_address))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn default_port() -> u16 {
    10053
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
