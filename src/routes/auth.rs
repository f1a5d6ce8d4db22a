use axum::extract::State;
use axum::Json;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::error::AppError;
use crate::models::{PublicUser, User};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Issues an access token for `user`.
pub(crate) fn auth_response(state: &SharedState, user: &User) -> Result<AuthResponse, AppError> {
    let claims = Claims::new(user.id, Duration::minutes(state.config.jwt_expiry_minutes));
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;
    Ok(AuthResponse {
        token,
        user: PublicUser::from(user),
    })
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Please provide email and password".to_string(),
        ));
    }
    let email = normalize_email(&req.email);

    if let Err(retry_after) = state.login_limiter.check(&email) {
        tracing::warn!(retry_after, "Login throttled");
        return Err(AppError::RateLimited {
            message: "Too many login attempts. Please try again later.".to_string(),
            retry_after,
        });
    }

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        state.login_limiter.record_failure(&email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&email);
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.reset(&email);
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(auth_response(&state, &user)?))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<PublicUser>, AppError> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    Ok(Json(PublicUser::from(&user)))
}
