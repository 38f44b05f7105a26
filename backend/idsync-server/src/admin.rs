//! Administrative endpoints for sync management.

use crate::{ApiResult, AppState};

use idsync_core::{IdentityConflict, SyncStatus, SyncSummary};

use axum::{Json, extract::State};
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub total_users: i64,
    pub linked_users: i64,
    pub sync_percentage: f64,
}

impl From<SyncStatus> for SyncStatusResponse {
    fn from(status: SyncStatus) -> Self {
        Self {
            total_users: status.total_users,
            linked_users: status.linked_users,
            sync_percentage: status.sync_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncRunResponse {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub conflicts: Vec<IdentityConflict>,
}

impl From<SyncSummary> for SyncRunResponse {
    fn from(summary: SyncSummary) -> Self {
        Self {
            created: summary.created,
            updated: summary.updated,
            unchanged: summary.unchanged,
            skipped: summary.skipped,
            failed: summary.failed,
            conflicts: summary.conflicts,
        }
    }
}

/// GET /admin/sync-status - Share of local users linked to the directory
pub async fn sync_status_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<SyncStatusResponse>> {
    let status = state.sync.store.sync_status().await?;

    Ok(Json(status.into()))
}

/// POST /admin/sync - Run one batch pass now and report its summary
pub async fn trigger_sync_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<SyncRunResponse>> {
    info!("Manual batch sync requested");

    let summary = state.sync.batch.run().await?;

    Ok(Json(summary.into()))
}
