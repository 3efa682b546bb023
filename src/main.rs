//! Product Catalog service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ request id ─▶ trace ─▶ body limit ─▶ timeout ─▶ logging
//!                                                               │
//!                                  ┌────────────────────────────┤
//!                                  ▼                            ▼
//!                        read routes (GET)          write routes (POST/PUT/DELETE)
//!                                  │                  auth ─▶ validation
//!                                  ▼                            │
//!                           query engine ◀──── ProductStore ◀───┘
//!                                  │            (one Mutex)
//!                                  ▼
//!   Client ◀──────────── JSON body, or ApiError envelope
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use product_catalog::config::load_config;
use product_catalog::lifecycle::signals::shutdown_on_ctrl_c;
use product_catalog::observability::{logging, metrics};
use product_catalog::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "product-catalog")]
#[command(about = "In-memory product catalog HTTP service", long_about = None)]
struct Args {
    /// Optional TOML config file. `PORT` in the environment overrides the listener port.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("product-catalog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        auth_header = %config.auth.header,
        request_timeout_secs = config.timeouts.request_secs,
        seed_demo_data = config.catalog.seed_demo_data,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        shutdown_on_ctrl_c(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
