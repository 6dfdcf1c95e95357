//! Pulse: an HTTP liveness probe service.
//!
//! This is the application entry point. It resolves configuration from CLI
//! arguments, environment variables, and an optional TOML file (in that
//! order of precedence), initializes tracing, builds the router, and runs
//! the HTTP server until a termination signal drains it.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pulse::config::{self, AppConfig, DEFAULT_CONFIG_PATH};
use pulse::http::start_server;
use pulse::routes::create_router;

/// Pulse: a minimal HTTP liveness probe service
#[derive(Parser, Debug)]
#[command(name = "pulse", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Bind address (overrides config file and BIND_ADDR)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config file first; CLI and environment override it below
    let mut config = AppConfig::load_or_default(&args.config)?;

    if let Some(host) = args.host.or_else(|| std::env::var("BIND_ADDR").ok()) {
        config.http.host = host;
    }
    if let Some(port) = args
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
    {
        config.http.port = port;
    }

    // Log level priority: CLI > env > default; absent or unrecognized -> info
    let requested = args.log_level.or_else(|| std::env::var("LOG_LEVEL").ok());
    let (level, unrecognized) = config::resolve_log_level(requested.as_deref());

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::default().add_directive(level.into()));
    match config.logging.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    if unrecognized {
        if let Some(value) = requested.as_deref() {
            tracing::warn!(%value, "Unrecognized log level, falling back to info");
        }
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        "Loaded configuration"
    );

    let app = create_router();

    if let Err(e) = start_server(app, &config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
