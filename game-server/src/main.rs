use std::sync::Arc;
use tokio::signal;
use tracing::info;

use game_persistence::DatabaseManager;
use game_server::{config::Config, create_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting locals API server...");

    let config = Config::from_env()?;

    // Initialize database connection, optionally running migrations
    let database = match DatabaseManager::connect(&config.database, config.run_migrations).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!("Failed to connect to database: {:#}", e);
            std::process::exit(1);
        }
    };

    let routes = create_routes(
        Arc::new(database.game_repository()),
        Arc::new(database.user_repository()),
    );

    let addr = config.bind_address()?;
    info!("Server starting on {}", addr);

    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let (Ok(mut sigint), Ok(mut sigterm)) = (
                signal::unix::signal(signal::unix::SignalKind::interrupt()),
                signal::unix::signal(signal::unix::SignalKind::terminate()),
            ) else {
                tracing::error!("Failed to install signal handlers");
                return;
            };

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if signal::ctrl_c().await.is_err() {
                tracing::error!("Failed to listen for ctrl+c");
                return;
            }
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    })?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");

    Ok(())
}
