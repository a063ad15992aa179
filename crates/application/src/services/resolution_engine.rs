use std::sync::Arc;
use tracing::{debug, warn};
use wildns_domain::{is_ipv4_literal, normalize_name, ResolutionResult};

use super::pattern::{MappingTable, WildcardRule};

pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 16;

/// Local lookup against the wildcard rule and the mapping table.
///
/// Holds no mutable state; one instance is shared by every in-flight query.
pub struct ResolutionEngine {
    wildcard: WildcardRule,
    mapping: MappingTable,
    max_chain_depth: usize,
}

impl ResolutionEngine {
    pub fn new(wildcard: WildcardRule, mapping: MappingTable) -> Self {
        Self {
            wildcard,
            mapping,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    /// Values below 1 are raised to 1.
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth.max(1);
        self
    }

    pub fn wildcard_domain(&self) -> &str {
        self.wildcard.domain()
    }

    pub fn max_chain_depth(&self) -> usize {
        self.max_chain_depth
    }

    pub fn resolve_address(&self, name: &str) -> ResolutionResult {
        let name = normalize_name(name);

        if let Some(ip) = self.wildcard.extract(&name) {
            debug!(name = %name, ip = %ip, "Wildcard match");
            return ResolutionResult::Address(Arc::from(ip));
        }

        let Some(destination) = self.mapping.lookup(&name) else {
            return ResolutionResult::Unmatched;
        };
        debug!(name = %name, destination = %destination, "Mapping match");

        let mut current = destination;
        let mut hops = 0usize;

        while !is_ipv4_literal(current) {
            let Some(next) = self.local_lookup(current) else {
                break;
            };

            hops += 1;
            if hops > self.max_chain_depth {
                warn!(
                    name = %name,
                    last = %current,
                    max_chain_depth = self.max_chain_depth,
                    "Mapping chain exceeded maximum depth, treating as unmatched"
                );
                return ResolutionResult::Unmatched;
            }

            debug!(from = %current, to = %next, hop = hops, "Chained mapping");
            current = next;
        }

        if is_ipv4_literal(current) {
            ResolutionResult::Address(Arc::from(current))
        } else {
            debug!(name = %name, target = %current, "Resolved to alias");
            ResolutionResult::Alias(Arc::from(current))
        }
    }

    /// Nameservers registered under `_NS`, only for the wildcard domain itself.
    pub fn resolve_nameservers(&self, name: &str) -> Option<&[Arc<str>]> {
        let name = normalize_name(name);
        let nameservers = self.mapping.nameservers();

        if name != self.wildcard.domain() || nameservers.is_empty() {
            return None;
        }

        debug!(name = %name, count = nameservers.len(), "Nameserver match");
        Some(nameservers)
    }

    /// One chain step: wildcard first, then the mapping table.
    fn local_lookup<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.wildcard
            .extract(name)
            .or_else(|| self.mapping.lookup(name))
    }
}
