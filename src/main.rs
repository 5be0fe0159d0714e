//! route-resolver service.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────┐
//!                   │                   ROUTE RESOLVER                      │
//!  GET /blog/ai     │  ┌────────┐   ┌────────────┐   ┌──────────────────┐  │
//!  ─────────────────┼─▶│  http  │──▶│  routing   │──▶│ "routing" query  │──┼──▶ CMS
//!                   │  │ server │   │ normalizer │   │  per candidate   │  │
//!                   │  └────────┘   │ + resolver │   └──────────────────┘  │
//!                   │       ▲       └─────┬──────┘                         │
//!                   │       │             ▼                                │
//!  200 JSON / 404   │  ┌────┴─────┐  ┌──────────┐   ┌──────────────────┐  │
//!  ◀────────────────┼──│ template │◀─│ content  │──▶│  entry fetch by  │──┼──▶ CMS
//!                   │  │ selection│  │ fetcher  │   │   identifier     │  │
//!                   │  └──────────┘  └──────────┘   └──────────────────┘  │
//!                   │                                                      │
//!                   │  config · observability · lifecycle                  │
//!                   └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_resolver::config::load_config;
use route_resolver::lifecycle::{signals, startup, Shutdown};
use route_resolver::HttpServer;

#[derive(Parser)]
#[command(name = "route-resolver")]
#[command(about = "Serve CMS-routed pages as JSON", long_about = None)]
struct Args {
    /// TOML configuration file. CONTENTSTACK_* variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    startup::init_observability(&config);
    tracing::info!("route-resolver v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        environment = %config.cms.environment,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let pipeline = startup::build_pipeline(&config.cms)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config.server.clone(), pipeline);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
