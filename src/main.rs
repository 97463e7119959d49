//! Edge router demo worker.
//!
//! Serves the demo route table over HTTP:
//!
//! ```text
//! client → HttpServer (request ID, trace, timeout)
//!        → SharedRouter (first matching route)
//!        → demo handler or pass-through to the upstream origin
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use edge_router::config::{self, EdgeConfig};
use edge_router::http::{HttpServer, Passthrough};
use edge_router::lifecycle::{signals, Shutdown};
use edge_router::observability::logging;
use edge_router::{worker, SharedRouter};

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Demo worker for the edge request router", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => EdgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.upstream.origin,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let upstream = Passthrough::new(&config.upstream.origin)?;
    let router = Arc::new(SharedRouter::from(worker::demo_router(upstream)?));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let server = HttpServer::new(&config, router);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
