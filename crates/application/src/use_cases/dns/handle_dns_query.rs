use crate::ports::UpstreamAnswer;
use crate::services::{AnswerClassifier, FallbackGateway, ResolutionEngine};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use wildns_domain::{
    normalize_name, AnswerRecord, DnsQuery, DomainError, QueryKind, RecordType, ResolutionResult,
};

/// What the server should send back for a query.
#[derive(Debug, Clone)]
pub enum QueryAnswer {
    /// Answered by local rules. Authority and additional sections are empty;
    /// an empty list is still a successful answer.
    Local(Vec<AnswerRecord>),
    /// Whatever the upstream resolver returned.
    Upstream(UpstreamAnswer),
}

impl QueryAnswer {
    pub fn is_local(&self) -> bool {
        matches!(self, QueryAnswer::Local(_))
    }
}

pub struct HandleDnsQueryUseCase {
    engine: Arc<ResolutionEngine>,
    classifier: AnswerClassifier,
    gateway: FallbackGateway,
    forward_aliases: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        engine: Arc<ResolutionEngine>,
        classifier: AnswerClassifier,
        gateway: FallbackGateway,
    ) -> Self {
        Self {
            engine,
            classifier,
            gateway,
            forward_aliases: false,
        }
    }

    /// Resolve alias targets through the upstream instead of answering CNAME.
    pub fn with_alias_forwarding(mut self, enabled: bool) -> Self {
        self.forward_aliases = enabled;
        self
    }

    pub async fn execute(
        &self,
        query: &DnsQuery,
        timeout: Option<Duration>,
    ) -> Result<QueryAnswer, DomainError> {
        match query.kind() {
            QueryKind::Address => self.lookup_address(&query.spelled, timeout).await,
            QueryKind::Nameserver => self.lookup_nameservers(&query.spelled, timeout).await,
            QueryKind::Other => self
                .gateway
                .forward(&query.domain, query.record_type, timeout)
                .await
                .map(QueryAnswer::Upstream),
        }
    }

    pub async fn lookup_address(
        &self,
        name: &str,
        timeout: Option<Duration>,
    ) -> Result<QueryAnswer, DomainError> {
        let start = Instant::now();
        let owner = name.trim_end_matches('.');
        let name = normalize_name(name);
        let result = self.engine.resolve_address(&name);

        if self.forward_aliases {
            if let ResolutionResult::Alias(target) = &result {
                debug!(name = %name, target = %target, "Forwarding alias target upstream");
                return self
                    .gateway
                    .forward(target, RecordType::A, timeout)
                    .await
                    .map(QueryAnswer::Upstream);
            }
        }

        match self.classifier.classify(owner, &result) {
            Some(answers) => {
                debug!(
                    name = %name,
                    answers = answers.len(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Answered locally"
                );
                Ok(QueryAnswer::Local(answers))
            }
            None => self
                .gateway
                .forward(&name, RecordType::A, timeout)
                .await
                .map(QueryAnswer::Upstream),
        }
    }

    pub async fn lookup_nameservers(
        &self,
        name: &str,
        timeout: Option<Duration>,
    ) -> Result<QueryAnswer, DomainError> {
        let owner = name.trim_end_matches('.');
        let name = normalize_name(name);

        let local = self
            .engine
            .resolve_nameservers(&name)
            .and_then(|hosts| self.classifier.nameservers(owner, hosts));

        match local {
            Some(answers) => Ok(QueryAnswer::Local(answers)),
            None => self
                .gateway
                .forward(&name, RecordType::NS, timeout)
                .await
                .map(QueryAnswer::Upstream),
        }
    }
}
