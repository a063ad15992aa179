#![allow(dead_code)]

mod mock_upstream;

pub use mock_upstream::{MockUpstreamResolver, UpstreamCall};

use std::sync::Arc;
use wildns_application::services::{
    AnswerClassifier, FallbackGateway, PatternCompiler, ResolutionEngine,
};
use wildns_application::use_cases::HandleDnsQueryUseCase;
use wildns_domain::{HostMappings, MappingEntry, MatchMode};

pub const DOMAIN: &str = "xip.test";

pub fn mappings(rules: &[(&str, &str)]) -> HostMappings {
    HostMappings::new(
        rules
            .iter()
            .map(|(pattern, destination)| MappingEntry::new(*pattern, *destination))
            .collect(),
        vec![],
    )
}

pub fn engine_with(mappings: &HostMappings, mode: MatchMode) -> ResolutionEngine {
    let compiler = PatternCompiler::new(mode);
    ResolutionEngine::new(
        compiler.compile_wildcard(DOMAIN).unwrap(),
        compiler.compile_mapping(mappings).unwrap(),
    )
}

pub fn engine(rules: &[(&str, &str)]) -> ResolutionEngine {
    engine_with(&mappings(rules), MatchMode::Anchored)
}

pub fn use_case(
    mappings: &HostMappings,
    upstream: Arc<MockUpstreamResolver>,
) -> HandleDnsQueryUseCase {
    HandleDnsQueryUseCase::new(
        Arc::new(engine_with(mappings, MatchMode::Anchored)),
        AnswerClassifier::default(),
        FallbackGateway::new(upstream),
    )
}
