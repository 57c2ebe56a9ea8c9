use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod error;
mod handlers;
mod router;
mod schemas;

use cli::Cli;

/// Main entry point for the bursar application.
#[tokio::main]
async fn main() -> Result<()> {
    // .env has to be loaded before clap reads DATABASE_URL / BIND_ADDRESS
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bursar=debug,compute=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("bursar {} starting up", env!("CARGO_PKG_VERSION"));

    Cli::parse().run().await
}
