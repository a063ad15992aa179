use clap::builder::FalseyValueParser;
use clap::Parser;
use tracing::info;
use wildns_domain::CliOverrides;

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "wildns")]
#[command(version)]
#[command(about = "Wildcard DNS server: answers <name>.<a.b.c.d>.<domain> with a.b.c.d and forwards the rest")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP and TCP listen port
    #[arg(short = 'p', long, env = "PORT")]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long = "bind", env = "BIND_ADDRESS")]
    bind: Option<String>,

    /// Wildcard domain
    #[arg(long = "domain", env = "WILDCARD_DOMAIN")]
    domain: Option<String>,

    /// Comma-separated upstream resolvers, host[:port]
    #[arg(long, env = "NAME_SERVERS")]
    name_servers: Option<String>,

    /// JSON host mapping file
    #[arg(long, env = "MAPPED_HOSTS", value_name = "FILE")]
    mapped_hosts: Option<String>,

    /// Log at debug level
    #[arg(long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            port: self.port,
            bind_address: self.bind.clone(),
            wildcard_domain: self.domain.clone(),
            name_servers: self.name_servers.clone(),
            mapped_hosts: self.mapped_hosts.clone(),
            log_level: self.log_level.clone(),
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting wildns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config).await?;

    let dns_addr = config.server.socket_addr()?;
    server::start_dns_server(dns_addr, services.handler).await?;

    info!("Server shutdown complete");
    Ok(())
}
