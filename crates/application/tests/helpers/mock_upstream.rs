use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wildns_application::ports::{UpstreamAnswer, UpstreamResolver};
use wildns_domain::{DnsQuery, DomainError, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCall {
    pub name: String,
    pub record_type: RecordType,
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct MockUpstreamResolver {
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
    responses: Arc<Mutex<HashMap<String, UpstreamAnswer>>>,
    errors: Arc<Mutex<HashMap<String, DomainError>>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn set_response(&self, name: &str, answer: UpstreamAnswer) {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), answer);
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.errors.lock().unwrap().insert(name.to_string(), error);
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockUpstreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn lookup(
        &self,
        query: &DnsQuery,
        timeout: Option<Duration>,
    ) -> Result<UpstreamAnswer, DomainError> {
        self.calls.lock().unwrap().push(UpstreamCall {
            name: query.domain.to_string(),
            record_type: query.record_type,
            timeout,
        });

        if let Some(error) = self.errors.lock().unwrap().get(&*query.domain) {
            return Err(error.clone());
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&*query.domain)
            .cloned()
            .unwrap_or_else(|| UpstreamAnswer::new(ResponseCode::NXDomain)))
    }
}
