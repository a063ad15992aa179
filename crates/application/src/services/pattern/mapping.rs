use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};
use wildns_domain::{DomainError, HostMappings, MatchMode};

use super::{build_matcher, glob_to_regex};

#[derive(Debug, Clone)]
pub struct MappingRule {
    pattern: Arc<str>,
    matcher: Regex,
    destination: Arc<str>,
}

impl MappingRule {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// Glob rules in configuration order; the first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    rules: Vec<MappingRule>,
    nameservers: Vec<Arc<str>>,
}

impl MappingTable {
    pub fn compile(mappings: &HostMappings, mode: MatchMode) -> Result<Self, DomainError> {
        let mut rules = Vec::with_capacity(mappings.rules.len());

        for entry in &mappings.rules {
            let matcher = build_matcher(&glob_to_regex(&entry.pattern), mode, &entry.pattern)?;
            debug!(
                pattern = %entry.pattern,
                regex = %matcher.as_str(),
                destination = %entry.destination,
                "Mapping rule compiled"
            );
            rules.push(MappingRule {
                pattern: Arc::from(entry.pattern.as_str()),
                matcher,
                destination: Arc::from(entry.destination.trim_end_matches('.')),
            });
        }

        let nameservers = mappings
            .nameservers
            .iter()
            .map(|ns| Arc::from(ns.trim_end_matches('.')))
            .collect();

        info!(
            rules = rules.len(),
            nameservers = mappings.nameservers.len(),
            match_mode = mode.as_str(),
            "Host mapping table compiled"
        );

        Ok(Self { rules, nameservers })
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(name))
            .map(|rule| rule.destination())
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn nameservers(&self) -> &[Arc<str>] {
        &self.nameservers
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
