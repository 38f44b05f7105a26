use idsync_engine::BatchScheduler;
use idsync_server::{AppState, ShutdownCoordinator, SyncServices, build_router, logger, metrics};

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Pick up IDSYNC_* variables from a local .env, if any
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = idsync_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    let log_file_path = logger::log_file_path(&config.logging)?;
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting idsync-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics_handle = match metrics::install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    // Initialize database pool (runs migrations)
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = idsync_db::create_pool(&database_path).await?;
    info!("Database connection established");

    let sync = SyncServices::from_config(&pool, &config)?;

    // Create shutdown coordinator
    let shutdown = ShutdownCoordinator::new();

    let scheduler = if config.sync.enabled {
        let interval = Duration::from_secs(config.sync.interval_secs);
        Some(BatchScheduler::new(sync.batch.clone(), interval).spawn(shutdown.subscribe()))
    } else {
        warn!("Scheduled batch sync DISABLED - only lazy and manual sync will run");
        None
    };

    let app = build_router(AppState {
        pool,
        sync,
        metrics: metrics_handle,
    });

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    let mut guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
        })
        .await?;

    if let Some(handle) = scheduler
        && let Err(e) = handle.await
    {
        warn!("Batch scheduler ended abnormally: {}", e);
    }

    info!("Graceful shutdown complete");

    Ok(())
}
