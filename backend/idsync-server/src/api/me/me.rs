use crate::{ApiError, ApiResult, AppState, AssertedIdentity, MeResponse, UserDto};

use std::panic::Location;

use axum::{Json, extract::State};
use error_location::ErrorLocation;

/// GET /api/v1/me - The local user linked to the asserted identity
///
/// Lazy sync has already run for this request. A user that is still not
/// linked means reconciliation failed or was skipped, which is a 404.
pub async fn get_me(
    State(state): State<AppState>,
    AssertedIdentity(assertion): AssertedIdentity,
) -> ApiResult<Json<MeResponse>> {
    let store = &state.sync.store;

    let user = store
        .find_by_external_id(&assertion.external_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("No local user linked to {}", assertion.external_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let assignments = store.role_assignments(&user).await?;

    Ok(Json(MeResponse {
        user: UserDto::new(user, assignments),
    }))
}
