//! crypto-server entry point.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crypto_server::api::{create_router, liveness_router, AppState};
use crypto_server::config::{parse_grace_period, Config};
use crypto_server::store::DynamoStore;
use crypto_server::telemetry::Telemetry;
use crypto_server::utils::shutdown_signal;

/// Tag under which telemetry events are reported.
const CLIENT_TAG: &str = "crypto-server";

/// Status/query service for cryptocurrency market snapshots.
#[derive(Parser, Debug)]
#[command(name = "crypto-server")]
#[command(about = "HTTP status/query service over a cryptocurrency snapshot table")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// How long to wait for in-flight requests on shutdown - e.g. 15s or 1m.
    #[arg(long, default_value = "15s", value_parser = parse_grace_period, global = true)]
    graceful_timeout: Duration,

    /// Read the listen address from a YAML file instead of HOST/PORT.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full record-query service (default).
    Serve,

    /// Run only the store-free liveness endpoint.
    Liveness,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("crypto_server=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => cmd_serve(args.config.as_deref(), args.graceful_timeout).await,
        Command::Liveness => cmd_liveness(args.config.as_deref(), args.graceful_timeout).await,
    }
}

/// Run the full record-query service.
async fn cmd_serve(config_path: Option<&Path>, grace: Duration) -> anyhow::Result<()> {
    // Store credentials and the telemetry token arrive through a local .env
    // file; the deployment contract treats its absence as fatal.
    dotenvy::dotenv().context("loading .env file")?;

    let config = load_config(config_path)?;
    info!("Configuration loaded successfully");
    info!("Table: {}", config.table_name);

    let telemetry = Telemetry::from_env(CLIENT_TAG);
    let store = Arc::new(DynamoStore::connect(&config.table_name).await);

    let state = AppState { store, telemetry };

    run_until_shutdown(create_router(state), &config, grace).await
}

/// Run only the liveness endpoint; no store session is opened.
async fn cmd_liveness(config_path: Option<&Path>, grace: Duration) -> anyhow::Result<()> {
    // The probe variant can run from plain process env.
    dotenvy::dotenv().ok();

    let config = load_config(config_path)?;
    let telemetry = Telemetry::from_env(CLIENT_TAG);

    run_until_shutdown(liveness_router(telemetry), &config, grace).await
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::load(path).context("loading configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

/// Serve until interrupted, then drain for at most the grace period.
///
/// The process exits 0 whether the drain completes or times out; transport
/// errors during serving are logged, never fatal.
async fn run_until_shutdown(
    router: axum::Router,
    config: &Config,
    grace: Duration,
) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("HTTP server listening on {addr}");
    info!("Starting server...");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await
    });

    shutdown_signal().await;
    info!("interrupt received, draining for up to {:?}", grace);
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => info!("drain complete"),
        Ok(Ok(Err(e))) => error!("server error during drain: {e}"),
        Ok(Err(e)) => error!("server task failed: {e}"),
        Err(_) => warn!("grace period elapsed with requests still in flight"),
    }

    info!("shutting down");
    Ok(())
}
