use crate::SyncServices;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sync: SyncServices,
    /// Present when the Prometheus recorder is installed
    pub metrics: Option<PrometheusHandle>,
}
