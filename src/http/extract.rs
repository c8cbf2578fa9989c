//! Bearer session extraction.

use super::{ApiError, AppState};
use crate::identity::domain::{SessionError, UserId};
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

/// Account resolved from the request's `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| SessionError::InvalidCredential))
            .transpose()?;
        let user = state.guard.authenticate(header)?;
        Ok(Self(user))
    }
}
