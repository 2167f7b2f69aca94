mod cli;
mod common;
mod config;
mod db_init;
mod devices;
mod routes;
mod sims;

#[cfg(test)]
mod test_helpers;

use crate::cli::Cli;
use crate::config::Config;
use crate::db_init::generator::SeedPlan;
use anyhow::Context;
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing/logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration and environment variables to pass to the application
    let config: Config = Config::from_env();
    let db_url = config
        .db_url
        .clone()
        .context("DB_URL, or DB_USER, DB_PASSWORD, DB_HOST and DB_NAME must be set")?;

    let db: DatabaseConnection = Database::connect(db_url)
        .await
        .context("Failed to connect to the database")?;

    if db.ping().await.is_ok() {
        info!("Connected to the database");
    } else {
        warn!("Could not connect to the database");
    }

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    info!("DB migrations complete");

    db_init::run(&db, &cli.actions, cli.seed, &SeedPlan::default())
        .await
        .context("Failed to prepare the database")?;

    info!(
        "Starting server {} ({} deployment) ...",
        config.app_name,
        config.deployment.to_uppercase()
    );

    let router = routes::build_router(&db, &config)?;
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
