use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

use super::errors::ConfigError;

/// Reserved mapping key holding the nameserver hostnames of the wildcard domain.
pub const NAMESERVER_KEY: &str = "_NS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingEntry {
    pub pattern: String,
    pub destination: String,
}

impl MappingEntry {
    pub fn new(pattern: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            destination: destination.into(),
        }
    }
}

/// Host mapping rules in configuration order, plus the `_NS` list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostMappings {
    pub rules: Vec<MappingEntry>,
    pub nameservers: Vec<String>,
}

impl HostMappings {
    pub fn new(rules: Vec<MappingEntry>, nameservers: Vec<String>) -> Self {
        Self { rules, nameservers }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.nameservers.is_empty()
    }

    /// Parses a JSON object of `pattern -> destination`.
    ///
    /// Key order in the document is rule order. `_NS` takes a list of
    /// hostnames (a single string is accepted too).
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<JsonHostMappings>(json).map(|m| m.0)
    }

    /// Loads the mapping file, or `Ok(None)` when it does not exist.
    pub fn load(path: &str) -> Result<Option<Self>, ConfigError> {
        if !Path::new(path).exists() {
            warn!(path = %path, "Host mapping file not found, ignoring");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_json_str(&contents)
            .map(Some)
            .map_err(|e| ConfigError::MappingParse(path.to_string(), e.to_string()))
    }
}

struct JsonHostMappings(HostMappings);

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingValue {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for JsonHostMappings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMappingVisitor)
    }
}

struct OrderedMappingVisitor;

impl<'de> Visitor<'de> for OrderedMappingVisitor {
    type Value = JsonHostMappings;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping host patterns to destinations")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mappings = HostMappings::default();

        while let Some((key, value)) = access.next_entry::<String, MappingValue>()? {
            match (key.as_str() == NAMESERVER_KEY, value) {
                (true, MappingValue::Many(hosts)) => mappings.nameservers = hosts,
                (true, MappingValue::One(host)) => mappings.nameservers = vec![host],
                (false, MappingValue::One(destination)) => {
                    mappings.rules.push(MappingEntry::new(key, destination))
                }
                (false, MappingValue::Many(_)) => {
                    return Err(de::Error::custom(format!(
                        "destination for '{}' must be a string",
                        key
                    )))
                }
            }
        }

        Ok(JsonHostMappings(mappings))
    }
}
