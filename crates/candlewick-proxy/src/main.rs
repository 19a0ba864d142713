use std::process::ExitCode;
use std::sync::Arc;

use axum::Router;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use candlewick_core::{DashboardConfig, ReqwestHttpClient};
use candlewick_proxy::{chart_router, relay_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "candlewick-proxy", version, about = "Candlewick chart proxy and relay")]
struct Cli {
    /// Address to bind (overrides CANDLEWICK_BIND).
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: ServeCommand,
}

#[derive(Debug, Subcommand)]
enum ServeCommand {
    /// Serve `GET /api/yahoo-finance` (normalized candles).
    Chart {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve `/proxy/*`, forwarding verbatim to the chart host.
    Relay {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> std::io::Result<()> {
    let mut config = DashboardConfig::from_env();
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let (name, port, build): (&str, u16, fn(Arc<AppState>) -> Router) = match cli.command {
        ServeCommand::Chart { port } => (
            "chart proxy",
            port.unwrap_or(config.chart_port),
            chart_router,
        ),
        ServeCommand::Relay { port } => {
            ("relay", port.unwrap_or(config.relay_port), relay_router)
        }
    };

    let bind = config.bind.clone();
    let state = AppState::new(config, Arc::new(ReqwestHttpClient::new()));
    let app = build(state);

    let listener = tokio::net::TcpListener::bind((bind.as_str(), port)).await?;
    tracing::info!("candlewick {name} listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl+C handler: {error}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully stopping");
}
