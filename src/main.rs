//! switchyard demo server.
//!
//! ```text
//! config (TOML or defaults)
//!     → tracing / metrics
//!     → Router (+ audit sink) → demo routes
//!     → Dispatcher (global chain, static fallback)
//!     → HttpServer on the bound listener until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use switchyard::config::{load_config, ServerConfig};
use switchyard::http::HttpServer;
use switchyard::lifecycle::{signals, startup, Shutdown};
use switchyard::middleware::MiddlewareRegistry;
use switchyard::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(about = "Request dispatcher demo server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("switchyard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_files = config.static_files.enabled,
        audit = config.audit.enabled,
        global_middleware = config.middleware.global.len(),
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

    let router = startup::router(&config);
    let templates = startup::templates(&config.templates);
    switchyard::demo::register(&router, templates);

    let dispatcher = startup::dispatcher(&config, router, &MiddlewareRegistry::with_builtins());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(config.listener.clone(), dispatcher)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
