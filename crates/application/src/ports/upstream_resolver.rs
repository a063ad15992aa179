use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;
use std::time::Duration;
use wildns_domain::{DnsQuery, DomainError, RecordType};

/// Sections of an upstream response, passed back to the client untouched.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
    pub upstream_server: Option<String>,
}

impl UpstreamAnswer {
    pub fn new(response_code: ResponseCode) -> Self {
        Self {
            response_code,
            answers: vec![],
            authority: vec![],
            additional: vec![],
            upstream_server: None,
        }
    }

    pub fn with_answers(mut self, answers: Vec<Record>) -> Self {
        self.answers = answers;
        self
    }
}

/// Recursive resolver consulted when no local rule answers a query.
///
/// Timeouts, retries and network errors are the implementor's business.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn lookup(
        &self,
        query: &DnsQuery,
        timeout: Option<Duration>,
    ) -> Result<UpstreamAnswer, DomainError>;

    async fn lookup_address(
        &self,
        name: &str,
        timeout: Option<Duration>,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.lookup(&DnsQuery::new(name, RecordType::A), timeout).await
    }

    async fn lookup_nameservers(
        &self,
        name: &str,
        timeout: Option<Duration>,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.lookup(&DnsQuery::new(name, RecordType::NS), timeout).await
    }
}
