//! One-shot administrative seed: runs a single batch pass against the
//! configured directory and prints the outcome.

use idsync_engine::SyncError;
use idsync_server::{SyncServices, logger};

use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("idsync-seed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let config = idsync_config::Config::load()?;
    config.validate()?;

    let log_file_path = logger::log_file_path(&config.logging)?;
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;
    config.log_summary();

    let pool = idsync_db::create_pool(&config.database_path()?).await?;
    let sync = SyncServices::from_config(&pool, &config)?;

    let summary = match sync.batch.run().await {
        Ok(summary) => summary,
        Err(e @ SyncError::BatchInProgress { .. }) => {
            log::warn!("Another batch is running, nothing seeded");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Created:   {}", summary.created);
    println!("Updated:   {}", summary.updated);
    println!("Unchanged: {}", summary.unchanged);
    println!("Skipped:   {}", summary.skipped);
    println!("Failed:    {}", summary.failed);

    for conflict in &summary.conflicts {
        println!(
            "Conflict:  {} is linked to {} locally but {} remotely (user {})",
            conflict.email,
            conflict.local_external_id.as_deref().unwrap_or("nothing"),
            conflict.remote_external_id,
            conflict.local_user_id
        );
    }

    let status = sync.store.sync_status().await?;
    println!(
        "Linked {}/{} local users ({:.2}%)",
        status.linked_users, status.total_users, status.sync_percentage
    );

    pool.close().await;

    Ok(())
}
