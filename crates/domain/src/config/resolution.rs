use serde::{Deserialize, Serialize};

use super::mapping::{HostMappings, MappingEntry};

/// How far a pattern must cover the candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Pattern must cover the whole name.
    #[default]
    Anchored,

    /// Pattern only has to match a prefix of the name. Compatible with older
    /// deployments that relied on it.
    Prefix,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anchored => "anchored",
            Self::Prefix => "prefix",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    #[serde(default = "default_wildcard_domain")]
    pub wildcard_domain: String,

    /// Path to a JSON host mapping file. Takes precedence over `rules`.
    #[serde(default)]
    pub mapped_hosts: Option<String>,

    #[serde(default)]
    pub rules: Vec<MappingEntry>,

    #[serde(default)]
    pub nameservers: Vec<String>,

    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,

    #[serde(default)]
    pub match_mode: MatchMode,

    /// Resolve alias targets upstream instead of answering with a CNAME.
    #[serde(default)]
    pub forward_aliases: bool,

    #[serde(default)]
    pub address_ttl: u32,
}

impl ResolutionConfig {
    pub fn inline_mappings(&self) -> HostMappings {
        HostMappings::new(self.rules.clone(), self.nameservers.clone())
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            wildcard_domain: default_wildcard_domain(),
            mapped_hosts: None,
            rules: vec![],
            nameservers: vec![],
            max_chain_depth: default_max_chain_depth(),
            match_mode: MatchMode::default(),
            forward_aliases: false,
            address_ttl: 0,
        }
    }
}

fn default_wildcard_domain() -> String {
    "xip.io".to_string()
}

fn default_max_chain_depth() -> usize {
    16
}
