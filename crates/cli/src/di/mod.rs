use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use wildns_application::services::{
    AnswerClassifier, FallbackGateway, PatternCompiler, ResolutionEngine,
};
use wildns_application::use_cases::HandleDnsQueryUseCase;
use wildns_domain::config::UpstreamServer;
use wildns_domain::Config;
use wildns_infrastructure::dns::{DnsServerHandler, UpstreamForwarder};

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let upstreams = resolve_upstreams(&config.upstream.parsed_servers()?).await?;
        let forwarder = UpstreamForwarder::new(
            upstreams,
            Duration::from_secs(config.upstream.query_timeout),
        );

        let engine = Self::build_engine(config)?;
        info!(
            domain = %engine.wildcard_domain(),
            max_chain_depth = engine.max_chain_depth(),
            forward_aliases = config.resolution.forward_aliases,
            "Resolution engine ready"
        );

        let use_case = HandleDnsQueryUseCase::new(
            Arc::new(engine),
            AnswerClassifier::new(config.resolution.address_ttl),
            FallbackGateway::new(Arc::new(forwarder)),
        )
        .with_alias_forwarding(config.resolution.forward_aliases);

        Ok(Self {
            handler: DnsServerHandler::new(Arc::new(use_case)),
        })
    }

    fn build_engine(config: &Config) -> anyhow::Result<ResolutionEngine> {
        let compiler = PatternCompiler::new(config.resolution.match_mode);
        let wildcard = compiler.compile_wildcard(&config.resolution.wildcard_domain)?;

        let mappings = config.host_mappings()?;
        if mappings.is_empty() {
            info!("No host mappings configured");
        }
        let mapping = compiler.compile_mapping(&mappings)?;

        Ok(ResolutionEngine::new(wildcard, mapping)
            .with_max_chain_depth(config.resolution.max_chain_depth))
    }
}

/// Resolves upstream hostnames once; unresolvable entries are skipped.
async fn resolve_upstreams(servers: &[UpstreamServer]) -> anyhow::Result<Vec<SocketAddr>> {
    let mut resolved = Vec::with_capacity(servers.len());

    for server in servers {
        if let Ok(ip) = server.host.parse::<IpAddr>() {
            resolved.push(SocketAddr::new(ip, server.port));
            continue;
        }

        match tokio::net::lookup_host((server.host.as_str(), server.port)).await {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => {
                    info!(upstream = %server, resolved = %addr, "Resolved upstream hostname");
                    resolved.push(addr);
                }
                None => warn!(upstream = %server, "Upstream hostname has no addresses, skipping"),
            },
            Err(e) => warn!(upstream = %server, error = %e, "Failed to resolve upstream, skipping"),
        }
    }

    if resolved.is_empty() {
        anyhow::bail!("none of the configured upstream servers could be resolved");
    }

    info!(
        servers = ?resolved.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        "Upstream resolvers"
    );
    Ok(resolved)
}
