pub mod errors;
pub mod logging;
pub mod mapping;
pub mod resolution;
pub mod root;
pub mod server;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use mapping::{HostMappings, MappingEntry, NAMESERVER_KEY};
pub use resolution::{MatchMode, ResolutionConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::{UpstreamConfig, UpstreamServer};
