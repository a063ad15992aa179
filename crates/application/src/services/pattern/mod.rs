mod mapping;
mod wildcard;

pub use mapping::{MappingRule, MappingTable};
pub use wildcard::WildcardRule;

use regex::{Regex, RegexBuilder};
use wildns_domain::{DomainError, HostMappings, MatchMode};

/// Builds the immutable matchers used by the resolution engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCompiler {
    mode: MatchMode,
}

impl PatternCompiler {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn compile_wildcard(&self, domain: &str) -> Result<WildcardRule, DomainError> {
        WildcardRule::compile(domain, self.mode)
    }

    pub fn compile_mapping(&self, mappings: &HostMappings) -> Result<MappingTable, DomainError> {
        MappingTable::compile(mappings, self.mode)
    }
}

/// Turns a `*` glob into a regex body. Every other character is literal.
pub(crate) fn glob_to_regex(pattern: &str) -> String {
    pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*")
}

pub(crate) fn build_matcher(
    body: &str,
    mode: MatchMode,
    source: &str,
) -> Result<Regex, DomainError> {
    let anchored = match mode {
        MatchMode::Anchored => format!("^(?:{})$", body),
        MatchMode::Prefix => format!("^(?:{})", body),
    };

    RegexBuilder::new(&anchored)
        .case_insensitive(true)
        .build()
        .map_err(|e| DomainError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })
}
