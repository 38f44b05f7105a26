use crate::{Metrics, ReconciliationEngine, SyncError, SyncLock, SyncResult, with_retry};

use idsync_config::{Config, RetryConfig};
use idsync_core::{RemoteIdentity, SyncSummary};
use idsync_directory::DirectoryClient;

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Name of the lease row guarding batch runs.
pub const BATCH_LOCK_NAME: &str = "directory-batch";

const TRIGGER: &str = "batch";

const MIN_RENEW_PERIOD: Duration = Duration::from_millis(10);

/// Tunables for [`BatchSync`].
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub retry: RetryConfig,
    /// Upper bound on one complete paginated listing attempt. Each page
    /// request has its own, shorter timeout in the directory client.
    pub fetch_timeout: Duration,
    /// Lease length. The lease is renewed every third of this while a run
    /// is in progress.
    pub lock_ttl: Duration,
}

impl BatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            retry: config.retry.clone(),
            fetch_timeout: Duration::from_secs(config.sync.fetch_deadline_secs),
            lock_ttl: Duration::from_secs(config.sync.lock_ttl_secs),
        }
    }
}

/// Full directory pass: lock, fetch with retry, reconcile, unlock.
pub struct BatchSync {
    engine: Arc<ReconciliationEngine>,
    directory: Arc<dyn DirectoryClient>,
    lock: Arc<dyn SyncLock>,
    settings: BatchSettings,
    metrics: Metrics,
}

impl BatchSync {
    pub fn new(
        engine: Arc<ReconciliationEngine>,
        directory: Arc<dyn DirectoryClient>,
        lock: Arc<dyn SyncLock>,
        settings: BatchSettings,
    ) -> Self {
        Self {
            engine,
            directory,
            lock,
            settings,
            metrics: Metrics::new(),
        }
    }

    /// Run one pass.
    ///
    /// Fails with [`SyncError::BatchInProgress`] without touching the
    /// directory when another run holds the lease. The lease is renewed
    /// for as long as the pass runs; if it is taken over anyway the pass
    /// stops with [`SyncError::LeaseLost`]. Records processed before a
    /// failure stay committed.
    pub async fn run(&self) -> SyncResult<SyncSummary> {
        let owner = Uuid::new_v4().to_string();

        if !self
            .lock
            .try_acquire(BATCH_LOCK_NAME, &owner, self.settings.lock_ttl)
            .await?
        {
            let holder = self
                .lock
                .holder(BATCH_LOCK_NAME)
                .await?
                .unwrap_or_else(|| String::from("unknown"));
            log::info!("Batch sync skipped, lease held by {}", holder);
            return Err(SyncError::batch_in_progress(holder));
        }

        self.metrics.batch_started();
        let started = Instant::now();
        let result = tokio::select! {
            result = self.run_locked() => result,
            lost = self.hold_lease(&owner) => Err(lost),
        };

        if let Err(e) = self.lock.release(BATCH_LOCK_NAME, &owner).await {
            log::warn!("Failed to release batch lock: {}", e);
        }

        match &result {
            Ok(summary) => {
                let elapsed = started.elapsed();
                self.metrics.batch_completed(summary, elapsed);
                log::info!(
                    "Batch sync finished in {:?}: {} created, {} updated, {} unchanged, {} skipped ({} conflicts), {} failed",
                    elapsed,
                    summary.created,
                    summary.updated,
                    summary.unchanged,
                    summary.skipped,
                    summary.conflicts.len(),
                    summary.failed
                );
            }
            Err(e) => {
                self.metrics.batch_aborted(e.kind());
                log::error!("Batch sync aborted: {}", e);
            }
        }

        result
    }

    async fn run_locked(&self) -> SyncResult<SyncSummary> {
        let this = self;
        let identities = with_retry(&self.settings.retry, "Directory fetch", move || {
            this.fetch_with_timeout()
        })
        .await?;

        log::info!("Reconciling {} remote identities", identities.len());

        self.engine.reconcile_batch(TRIGGER, &identities).await
    }

    /// Renew the lease until it is lost. Never returns while it is held.
    async fn hold_lease(&self, owner: &str) -> SyncError {
        let ttl = self.settings.lock_ttl;
        let period = (ttl / 3).max(MIN_RENEW_PERIOD);

        loop {
            tokio::time::sleep(period).await;

            match self.lock.renew(BATCH_LOCK_NAME, owner, ttl).await {
                Ok(true) => log::debug!("Renewed batch lease for {:?}", ttl),
                Ok(false) => {
                    log::error!("Batch lease was taken over, stopping this run");
                    return SyncError::lease_lost(BATCH_LOCK_NAME);
                }
                // Transient; the lease is still ours until it expires.
                Err(e) => log::warn!("Failed to renew batch lease: {}", e),
            }
        }
    }

    async fn fetch_with_timeout(&self) -> SyncResult<Vec<RemoteIdentity>> {
        match tokio::time::timeout(self.settings.fetch_timeout, self.directory.fetch_all()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(SyncError::directory_unavailable(format!(
                "listing did not complete within {:?}",
                self.settings.fetch_timeout
            ))),
        }
    }
}
