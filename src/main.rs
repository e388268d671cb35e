use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shorty::config;

/// URL-shortening gateway.
#[derive(Parser)]
#[command(name = "shorty")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host to bind, overrides the host part of `LISTEN`
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the port part of `LISTEN`
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if cli.host.is_some() || cli.port.is_some() {
        let (host, port) = config
            .listen_addr
            .rsplit_once(':')
            .context("LISTEN must be in format 'host:port'")?;
        let host = cli.host.as_deref().unwrap_or(host);
        let port = cli.port.map(|p| p.to_string()).unwrap_or_else(|| port.to_string());
        config.listen_addr = format!("{host}:{port}");
    }

    init_tracing(&config.log_level, &config.log_format)?;
    config.print_summary();

    shorty::server::run(config).await
}

/// Installs the global subscriber; `log_format` is `text` or `json`.
fn init_tracing(log_level: &str, log_format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level)
        .with_context(|| format!("Invalid RUST_LOG filter '{}'", log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
