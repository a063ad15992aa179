//! wildns domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolution;

pub use config::{CliOverrides, Config, ConfigError, HostMappings, MappingEntry, MatchMode};
pub use dns_query::{normalize_name, DnsQuery};
pub use dns_record::{AnswerRecord, QueryKind, RecordType, LOCAL_RECORD_TTL};
pub use errors::DomainError;
pub use resolution::{is_ipv4_literal, ResolutionResult};
