use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use tracing::debug;
use wildns_application::ports::UpstreamAnswer;
use wildns_domain::DomainError;

/// Upstream response split into the parts the forwarder cares about.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub answers: Vec<Record>,

    pub authority: Vec<Record>,

    pub additional: Vec<Record>,
}

impl DnsResponse {
    pub fn into_upstream_answer(self, server: String) -> UpstreamAnswer {
        UpstreamAnswer {
            response_code: self.rcode,
            answers: self.answers,
            authority: self.authority,
            additional: self.additional,
            upstream_server: Some(server),
        }
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let mut message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let id = message.id();
        let rcode = message.response_code();
        let truncated = message.truncated();
        let answers = message.take_answers();
        let authority = message.take_name_servers();
        let additional = message.take_additionals();

        debug!(
            id = id,
            rcode = ?rcode,
            truncated = truncated,
            answers = answers.len(),
            authority = authority.len(),
            additional = additional.len(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id,
            rcode,
            truncated,
            answers,
            authority,
            additional,
        })
    }
}
