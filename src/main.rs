use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tempo::config::{Config, LogFormat};
use tempo::{demo, logging};

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "Demo server with per-request timing logs", long_about = None)]
struct Cli {
    /// Address to bind (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Port to bind (overrides SERVER_PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Log output format: text or json (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    logging::init(config.logging.format);
    info!("Loaded configuration (log format: {})", config.logging.format);

    let app = demo::create_router();

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("🚀 Server listening on http://{}", addr);
    info!("   - GET /health, /slow?ms=<n>, /error");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
