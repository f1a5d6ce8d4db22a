use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::authenticate;
use crate::error::AppError;
use crate::state::SharedState;

/// The authenticated caller. Handlers taking this argument reject requests
/// without a valid token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = credential(parts)?
            .ok_or_else(|| AppError::Unauthorized("Not authorized to access this route".to_string()))?;

        let user_id = authenticate(token, &state.config.jwt_secret)?;
        Ok(AuthUser { user_id })
    }
}

/// Reads the token from `Authorization: Bearer` or, failing that, `x-auth-token`.
fn credential(parts: &Parts) -> Result<Option<&str>, AppError> {
    if let Some(auth_header) = parts.headers.get("authorization") {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(Some(token.trim()));
        }
    }

    if let Some(header) = parts.headers.get("x-auth-token") {
        let token = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid x-auth-token header".to_string()))?;
        return Ok(Some(token.trim()));
    }

    Ok(None)
}
