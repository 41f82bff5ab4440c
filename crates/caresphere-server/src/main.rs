//! # CareSphere Server
//!
//! Main entry point for the CareSphere application: a single process
//! serving the REST API over the Postgres-backed content cache.

use caresphere_config::ConfigLoader;
use caresphere_core::{CareError, CareResult};
use caresphere_repository::create_pool;
use caresphere_rest::create_router;
use tracing::{error, info};

mod startup;

use startup::{build_state, init_logging, print_startup_info, shutdown_signal};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting CareSphere server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> CareResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    // Create database pool and run migrations
    let database = create_pool(&config.database).await?;
    database.run_migrations().await?;

    // Wire services and build the router
    let state = build_state(&config, database)?;
    let router = create_router(state, &config.server);

    // Start the REST server
    let addr = config.server.addr();
    print_startup_info(&config.server);
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CareError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CareError::internal(format!("REST server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}
