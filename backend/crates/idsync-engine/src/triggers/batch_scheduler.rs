use crate::{BatchSync, SyncError};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Runs [`BatchSync`] on a fixed interval until shutdown is signalled.
pub struct BatchScheduler {
    batch: Arc<BatchSync>,
    interval: Duration,
}

impl BatchScheduler {
    pub fn new(batch: Arc<BatchSync>, interval: Duration) -> Self {
        Self { batch, interval }
    }

    /// Spawn the loop. The first pass starts immediately.
    pub fn spawn(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            log::info!("Batch sync scheduled every {:?}", self.interval);

            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        log::info!("Batch scheduler stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        match self.batch.run().await {
                            Ok(_) | Err(SyncError::BatchInProgress { .. }) => {}
                            Err(e) => log::warn!("Scheduled batch sync failed: {}", e),
                        }
                    }
                }
            }
        })
    }
}
