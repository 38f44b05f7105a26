//! Request middleware

use crate::{ApiError, ApiResult, AppState, AssertedIdentity};

use idsync_core::RoleName;
use idsync_db::RoleRepository;

use std::panic::Location;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use error_location::ErrorLocation;

/// Reconcile the asserted identity before the handler runs.
///
/// Requests without an assertion pass through untouched. Sync failures are
/// logged by [`LazySync`](idsync_engine::LazySync) and never change the
/// response.
pub async fn lazy_sync(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(assertion) = AssertedIdentity::from_headers(request.headers()) {
        state.sync.lazy.on_request(&assertion).await;
        request.extensions_mut().insert(assertion);
    }

    next.run(request).await
}

/// Admit only asserted identities linked to a local user holding the Admin
/// role in any account.
pub async fn require_admin(
    State(state): State<AppState>,
    AssertedIdentity(assertion): AssertedIdentity,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let forbidden = |message: String| ApiError::Forbidden {
        message,
        location: ErrorLocation::from(Location::caller()),
    };

    let store = &state.sync.store;
    let user = store
        .find_by_external_id(&assertion.external_id)
        .await?
        .ok_or_else(|| forbidden(format!("{} is not a local user", assertion.external_id)))?;

    let admin = RoleRepository::new(state.pool.clone())
        .find_by_name(RoleName::Admin.as_str())
        .await?
        .ok_or_else(|| forbidden(String::from("no Admin role is seeded")))?;

    let is_admin = store
        .role_assignments(&user)
        .await?
        .iter()
        .any(|assignment| assignment.role_id == admin.id);

    if !is_admin {
        log::warn!("Refused admin request from {}", user.email);
        return Err(forbidden(format!("{} is not an admin", user.email)));
    }

    Ok(next.run(request).await)
}
