use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::warn;
use wildns_domain::{AnswerRecord, ResolutionResult, LOCAL_RECORD_TTL};

/// Turns local resolution results into answer descriptors.
///
/// `None` means "no local answer, fall back"; `Some(vec![])` is a successful
/// answer with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerClassifier {
    address_ttl: u32,
}

impl AnswerClassifier {
    pub fn new(address_ttl: u32) -> Self {
        Self { address_ttl }
    }

    pub fn classify(&self, name: &str, result: &ResolutionResult) -> Option<Vec<AnswerRecord>> {
        match result {
            ResolutionResult::Unmatched => None,
            ResolutionResult::Address(literal) => Some(self.address(name, literal)),
            ResolutionResult::Alias(target) => Some(vec![AnswerRecord::Alias {
                name: Arc::from(name),
                target: Arc::clone(target),
                ttl: LOCAL_RECORD_TTL,
            }]),
        }
    }

    pub fn nameservers(&self, name: &str, hosts: &[Arc<str>]) -> Option<Vec<AnswerRecord>> {
        if hosts.is_empty() {
            return None;
        }

        let name: Arc<str> = Arc::from(name);
        Some(
            hosts
                .iter()
                .map(|host| AnswerRecord::Nameserver {
                    name: Arc::clone(&name),
                    host: Arc::clone(host),
                    ttl: LOCAL_RECORD_TTL,
                })
                .collect(),
        )
    }

    fn address(&self, name: &str, literal: &str) -> Vec<AnswerRecord> {
        match literal.parse::<Ipv4Addr>() {
            Ok(address) => vec![AnswerRecord::Address {
                name: Arc::from(name),
                address,
                ttl: self.address_ttl,
            }],
            Err(e) => {
                warn!(name = %name, address = %literal, error = %e, "Invalid IPv4 literal, answering empty");
                vec![]
            }
        }
    }
}
