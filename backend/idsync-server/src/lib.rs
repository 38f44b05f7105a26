pub mod admin;
pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::asserted_identity::AssertedIdentity,
    me::{me::get_me, me_response::MeResponse, user_dto::UserDto},
};
pub use error::{Result as ServerErrorResult, ServerError};
pub use services::SyncServices;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use state::AppState;

pub use crate::routes::build_router;
