// ABOUTME: Onboarding service server binary
// ABOUTME: Loads configuration, runs migrations, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Onboarding Service Server Binary
//!
//! Starts the onboarding HTTP API with JWT authentication and SQLite storage.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use onboarding_service::{
    auth::AuthManager, config::ServerConfig, context::ServerResources, database::Database,
    logging, routes,
};

#[derive(Parser)]
#[command(name = "onboarding-server")]
#[command(about = "Onboarding service - volunteer management and admin approval API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting onboarding service");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.url);

    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.clone().into_bytes(),
        config.auth.jwt_expiry_hours,
    );

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let app = routes::build_router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", http_port)).await?;
    info!("Listening on port {http_port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
