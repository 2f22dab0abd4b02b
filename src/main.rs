//! Advisory engine HTTP server.
//!
//! Usage:
//!   advisory-engine --config config/default --port 8080
//!
//! Log verbosity follows `RUST_LOG` (default: `info`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use advisory_engine::api::{AppState, create_router};
use advisory_engine::config::ConfigLoader;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "advisory-engine")]
#[command(about = "Estate tax estimation and insurance strategy recommendation service")]
#[command(version)]
struct Args {
    /// Directory containing tax.yaml and recommendation.yaml
    #[arg(long, default_value = "config/default")]
    config: PathBuf,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match ConfigLoader::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!(path = %args.config.display(), error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "Advisory engine listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server terminated");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
