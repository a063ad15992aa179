use std::net::Ipv4Addr;
use std::sync::Arc;

/// TTL applied to locally produced alias and nameserver answers.
pub const LOCAL_RECORD_TTL: u32 = 3600;

/// Protocol-neutral answer produced by local resolution.
///
/// The server layer renders these into wire records; nothing here knows about
/// DNS encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRecord {
    Address {
        name: Arc<str>,
        address: Ipv4Addr,
        ttl: u32,
    },
    Alias {
        name: Arc<str>,
        target: Arc<str>,
        ttl: u32,
    },
    Nameserver {
        name: Arc<str>,
        host: Arc<str>,
        ttl: u32,
    },
}

impl AnswerRecord {
    pub fn name(&self) -> &str {
        match self {
            AnswerRecord::Address { name, .. }
            | AnswerRecord::Alias { name, .. }
            | AnswerRecord::Nameserver { name, .. } => name,
        }
    }

    pub fn ttl(&self) -> u32 {
        match self {
            AnswerRecord::Address { ttl, .. }
            | AnswerRecord::Alias { ttl, .. }
            | AnswerRecord::Nameserver { ttl, .. } => *ttl,
        }
    }
}
