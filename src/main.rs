//! Mount gateway
//!
//! Serves the auth, task, team and user handler groups behind one listener.
//!
//! ```text
//!     Client Request
//!     ──────────▶ listener ──▶ middleware ──▶ Dispatcher ──▶ first matching mount
//!                              (request id,    (MountTable,     /auth  → auth group
//!                               trace,          immutable)      /task  → task group
//!                               timeout,                        /team  → team group
//!                               body limit)                     /user  → user group
//!                                                   │
//!                                                   └── no match ──▶ 404 no_route
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mount_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use mount_gateway::groups::GroupRegistry;
use mount_gateway::lifecycle::{signals, startup};
use mount_gateway::observability::{logging, metrics};
use mount_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "mount-gateway")]
#[command(about = "Path-prefix dispatcher for the auth, task, team and user handler groups", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mount-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mounts = config.mounts.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let registry = GroupRegistry::standard();
    let dispatcher = startup::build_dispatcher(&config, &registry)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(&config, dispatcher)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
