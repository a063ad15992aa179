pub mod answer_classifier;
pub mod fallback_gateway;
pub mod pattern;
pub mod resolution_engine;

pub use answer_classifier::AnswerClassifier;
pub use fallback_gateway::FallbackGateway;
pub use pattern::{MappingRule, MappingTable, PatternCompiler, WildcardRule};
pub use resolution_engine::{ResolutionEngine, DEFAULT_MAX_CHAIN_DEPTH};
