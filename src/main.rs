use anyhow::Result;
use clap::Parser;
use rand::RngCore;
use std::net::SocketAddr;
use tracing::info;

mod config;
mod dashboard;
mod pipeline;

use config::Config;
use dashboard::AppState;
use pipeline::DatasetParams;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let seed = config
        .seed
        .unwrap_or_else(|| rand::thread_rng().next_u64());
    let params = DatasetParams {
        rows_per_player: config.rows_per_player,
        boost_threshold: config.boost_threshold,
        boost_probability: config.boost_probability,
    };
    info!(
        "Synthesizing dataset: 5 players x {} rows, boost >{} pts @ p={} (seed {})",
        params.rows_per_player, params.boost_threshold, params.boost_probability, seed
    );

    // Run the full pipeline once; a degenerate label set aborts startup
    // loudly rather than serving an uninformative model.
    let output = pipeline::run(&params, seed)?;

    let state = AppState {
        output: std::sync::Arc::new(output),
    };
    let app = dashboard::router(state);
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run dashboard server (blocks until shutdown)
    axum::serve(listener, app).await?;

    Ok(())
}
