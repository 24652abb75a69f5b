//! `api-gateway` binary.
//!
//! Loads configuration, installs logging and metrics, then serves until
//! Ctrl+C or SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_gateway::config::{apply_env_overrides, load_config, validate_config, ConfigError};
use api_gateway::observability::{logging, metrics};
use api_gateway::service::descriptor::{HEALTH_PATH, PROXY_PATH};
use api_gateway::{lifecycle, GatewayConfig, GatewayError, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "api-gateway", version)]
#[command(about = "Minimal HTTP gateway with a single-hop proxy endpoint", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the file and the PORT variable.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<GatewayConfig, GatewayError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), GatewayError> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(config.observability.log_format);

    tracing::info!(
        service = %config.service.name,
        version = %config.service.version,
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("API Gateway running on http://{local_addr}");
    tracing::info!("Health check: http://{local_addr}{HEALTH_PATH}");
    tracing::info!("Proxy endpoint: http://{local_addr}{PROXY_PATH}?url=<target_url>");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            lifecycle::wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
