use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::Transport;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wildns_application::ports::{UpstreamAnswer, UpstreamResolver};
use wildns_domain::{DnsQuery, DomainError};

/// Forwards queries to the configured upstream resolvers.
///
/// Servers are tried in order; the first one that produces a parseable reply
/// wins, whatever its response code. A truncated UDP reply is retried over TCP
/// against the same server.
pub struct UpstreamForwarder {
    servers: Vec<SocketAddr>,
    default_timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(servers: Vec<SocketAddr>, default_timeout: Duration) -> Self {
        Self {
            servers,
            default_timeout,
        }
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    async fn query_server(
        &self,
        server: SocketAddr,
        query_id: u16,
        query_bytes: &[u8],
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let start = Instant::now();

        let udp = Transport::udp(server).send(query_bytes, timeout).await?;
        let response = parse_matching(&udp.bytes, query_id)?;

        if !response.truncated {
            return Ok(response);
        }

        debug!(server = %server, "Response truncated (TC bit), retrying via TCP");

        let remaining = timeout
            .checked_sub(start.elapsed())
            .unwrap_or(Duration::from_millis(500));
        let tcp = Transport::tcp(server).send(query_bytes, remaining).await?;
        debug!(server = %server, protocol = tcp.protocol_used, bytes = tcp.bytes.len(), "Retry answered");
        parse_matching(&tcp.bytes, query_id)
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamForwarder {
    async fn lookup(
        &self,
        query: &DnsQuery,
        timeout: Option<Duration>,
    ) -> Result<UpstreamAnswer, DomainError> {
        if self.servers.is_empty() {
            return Err(DomainError::TransportNoUpstreams);
        }

        let timeout = timeout.unwrap_or(self.default_timeout);
        let (query_id, query_bytes) = MessageBuilder::build_query(&query.domain, query.record_type)?;
        let mut all_timed_out = true;

        debug!(
            strategy = "failover",
            servers = self.servers.len(),
            domain = %query.domain,
            record_type = %query.record_type,
            "Trying sequentially"
        );

        for (index, server) in self.servers.iter().enumerate() {
            let start = Instant::now();
            match self.query_server(*server, query_id, &query_bytes, timeout).await {
                Ok(response) => {
                    debug!(
                        server = %server,
                        rcode = ?response.rcode,
                        answers = response.answers.len(),
                        latency_ms = start.elapsed().as_millis() as u64,
                        position = index,
                        "Server responded"
                    );
                    return Ok(response.into_upstream_answer(server.to_string()));
                }
                Err(e) => {
                    if !matches!(e, DomainError::TransportTimeout { .. }) {
                        all_timed_out = false;
                    }
                    warn!(server = %server, error = %e, position = index, "Failing over");
                }
            }
        }

        if all_timed_out {
            Err(DomainError::QueryTimeout)
        } else {
            Err(DomainError::TransportAllServersUnreachable)
        }
    }
}

fn parse_matching(bytes: &[u8], query_id: u16) -> Result<DnsResponse, DomainError> {
    let response = ResponseParser::parse(bytes)?;
    if response.id != query_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response id {} does not match query id {}",
            response.id, query_id
        )));
    }
    Ok(response)
}
