//! Axum extractor for the trusted identity assertion

use crate::{ApiError, AppState};

use idsync_engine::IdentityAssertion;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Header carrying the identity provider's user id
pub const IDENTITY_ID_HEADER: &str = "X-Identity-Id";
/// Header carrying the identity's email
pub const IDENTITY_EMAIL_HEADER: &str = "X-Identity-Email";

/// The identity asserted by the upstream authentication proxy.
///
/// There is no fallback identity: a request without both headers is
/// rejected with 401.
pub struct AssertedIdentity(pub IdentityAssertion);

impl AssertedIdentity {
    /// Read the assertion from request headers, if complete.
    pub fn from_headers(headers: &http::HeaderMap) -> Option<IdentityAssertion> {
        let read = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        IdentityAssertion::from_parts(read(IDENTITY_ID_HEADER), read(IDENTITY_EMAIL_HEADER))
    }
}

impl FromRequestParts<AppState> for AssertedIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // The lazy sync middleware has usually parsed it already
            if let Some(assertion) = parts.extensions.get::<IdentityAssertion>() {
                return Ok(AssertedIdentity(assertion.clone()));
            }

            Self::from_headers(&parts.headers)
                .map(AssertedIdentity)
                .ok_or_else(|| ApiError::Unauthorized {
                    message: format!(
                        "missing {} or {} header",
                        IDENTITY_ID_HEADER, IDENTITY_EMAIL_HEADER
                    ),
                    location: ErrorLocation::from(Location::caller()),
                })
        }
    }
}
