use regex::Regex;
use std::sync::Arc;
use tracing::info;
use wildns_domain::{DomainError, MatchMode};

use super::build_matcher;

/// Matches `<label>.<A>.<B>.<C>.<D>.<domain>` and yields `A.B.C.D`.
#[derive(Debug, Clone)]
pub struct WildcardRule {
    domain: Arc<str>,
    matcher: Regex,
}

impl WildcardRule {
    pub fn compile(domain: &str, mode: MatchMode) -> Result<Self, DomainError> {
        let domain = domain.trim().trim_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            return Err(DomainError::InvalidPattern {
                pattern: domain,
                reason: "wildcard domain is empty".to_string(),
            });
        }

        let body = format!(
            r".+\.(?P<ipaddr>[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)\.{}",
            regex::escape(&domain)
        );
        let matcher = build_matcher(&body, mode, &domain)?;

        info!(domain = %domain, pattern = %matcher.as_str(), "Wildcard rule compiled");

        Ok(Self {
            domain: Arc::from(domain),
            matcher,
        })
    }

    /// Dotted tuple embedded in `name`, if any. The rightmost four numeric
    /// labels before the domain win.
    pub fn extract<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.matcher
            .captures(name)
            .and_then(|caps| caps.name("ipaddr"))
            .map(|m| m.as_str())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }
}
