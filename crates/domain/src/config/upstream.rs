use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use super::errors::ConfigError;

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `host[:port]` entries, tried in order.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Seconds, used when the caller supplies no timeout.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl UpstreamConfig {
    pub fn parsed_servers(&self) -> Result<Vec<UpstreamServer>, ConfigError> {
        self.servers.iter().map(|s| s.parse()).collect()
    }

    /// Replaces the server list from a comma-separated string.
    ///
    /// Blank entries are skipped; a list with no entries leaves the defaults.
    pub fn set_from_list(&mut self, list: &str) {
        let servers: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        self.servers = if servers.is_empty() {
            default_servers()
        } else {
            servers
        };
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()]
}

fn default_query_timeout() -> u64 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamServer {
    pub host: String,
    pub port: u16,
}

impl FromStr for UpstreamServer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entry = s.trim();
        let invalid = |reason: &str| ConfigError::InvalidUpstream(entry.to_string(), reason.into());

        if entry.is_empty() {
            return Err(invalid("empty entry"));
        }

        // [v6]:port or [v6]
        if let Some(rest) = entry.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| invalid("missing closing bracket"))?;
            let port = match tail.strip_prefix(':') {
                Some(p) => p.parse().map_err(|_| invalid("invalid port"))?,
                None if tail.is_empty() => DEFAULT_DNS_PORT,
                None => return Err(invalid("unexpected characters after address")),
            };
            return Ok(Self {
                host: host.to_string(),
                port,
            });
        }

        // Bare IPv6 literal, no port.
        if entry.parse::<Ipv6Addr>().is_ok() {
            return Ok(Self {
                host: entry.to_string(),
                port: DEFAULT_DNS_PORT,
            });
        }

        match entry.split_once(':') {
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(invalid("empty host"));
                }
                let port = port.parse().map_err(|_| invalid("invalid port"))?;
                Ok(Self {
                    host: host.to_string(),
                    port,
                })
            }
            None => Ok(Self {
                host: entry.to_string(),
                port: DEFAULT_DNS_PORT,
            }),
        }
    }
}

impl fmt::Display for UpstreamServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
