use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use wildns_domain::{DnsQuery, DomainError, RecordType};

use crate::ports::{UpstreamAnswer, UpstreamResolver};

/// Hands queries with no local answer to the upstream resolver.
///
/// The timeout goes through unchanged and the result comes back unmodified.
#[derive(Clone)]
pub struct FallbackGateway {
    upstream: Arc<dyn UpstreamResolver>,
}

impl FallbackGateway {
    pub fn new(upstream: Arc<dyn UpstreamResolver>) -> Self {
        Self { upstream }
    }

    pub async fn forward(
        &self,
        name: &str,
        record_type: RecordType,
        timeout: Option<Duration>,
    ) -> Result<UpstreamAnswer, DomainError> {
        let query = DnsQuery::new(name, record_type);
        debug!(name = %query.domain, record_type = %record_type, "Fallback to upstream");

        match record_type {
            RecordType::A => self.upstream.lookup_address(&query.domain, timeout).await,
            RecordType::NS => self.upstream.lookup_nameservers(&query.domain, timeout).await,
            _ => self.upstream.lookup(&query, timeout).await,
        }
    }
}
