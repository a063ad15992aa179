use super::{QueryKind, RecordType};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    /// Name as the client spelled it, root dot stripped. Used as the owner
    /// name of local answers.
    pub spelled: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    /// Builds a query with its name lower-cased and the root dot stripped.
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: Arc::from(normalize_name(domain)),
            spelled: Arc::from(domain.trim_end_matches('.')),
            record_type,
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.record_type.kind()
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
