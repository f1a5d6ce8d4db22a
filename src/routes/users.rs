use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::{AuthResponse, auth_response, normalize_email};
use crate::auth::extractor::AuthUser;
use crate::auth::password::{self, MIN_PASSWORD_LEN};
use crate::config::RegistrationMode;
use crate::error::{AppError, FieldError};
use crate::models::{PublicUser, User};
use crate::services::validation::{self, Checker};
use crate::state::SharedState;

const USER_NAME_MAX: usize = 100;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn check_email(email: Option<&str>) -> Result<String, FieldError> {
    let email = normalize_email(email.unwrap_or_default());
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(FieldError::new("email", "Please provide a valid email")),
    }
}

fn check_password(field: &'static str, password: Option<&str>) -> Result<String, FieldError> {
    match password {
        Some(p) if p.chars().count() >= MIN_PASSWORD_LEN => Ok(p.to_string()),
        _ => Err(FieldError::new(
            field,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        )),
    }
}

fn clean_country(country: Option<String>) -> Option<String> {
    country
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if state.config.registration == RegistrationMode::Closed {
        return Err(AppError::Forbidden("Registration is disabled".to_string()));
    }

    let mut checker = Checker::new();
    let name = checker.check(validation::required_text(
        "name",
        "Name",
        req.name.as_deref(),
        USER_NAME_MAX,
        true,
    ));
    let email = checker.check(check_email(req.email.as_deref()));
    let password = checker.check(check_password("password", req.password.as_deref()));
    checker.finish()?;

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(AppError::Internal("validated fields missing".to_string()));
    };

    let password_hash = password::hash(&password).map_err(AppError::Internal)?;
    let user = state
        .store
        .create_user(&User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            name,
            country: clean_country(req.country),
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(auth_response(&state, &user)?))
}

pub async fn update_profile(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, AppError> {
    let current = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let name = match req.name.as_deref() {
        Some(name) => validation::text("name", "Name", name, USER_NAME_MAX, true)
            .map_err(|e| AppError::Validation(vec![e]))?,
        None => current.name,
    };
    let country = match req.country {
        Some(country) => clean_country(Some(country)),
        None => current.country,
    };

    let user = state
        .store
        .update_user_profile(auth.user_id, &name, country.as_deref())
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    Ok(Json(PublicUser::from(&user)))
}

pub async fn change_password(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let new_password = check_password("new_password", Some(&req.new_password))
        .map_err(|e| AppError::Validation(vec![e]))?;

    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let valid = password::verify(&req.current_password, &user.password_hash)
        .map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = password::hash(&new_password).map_err(AppError::Internal)?;
    state
        .store
        .update_user_password(user.id, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "Password changed");
    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized_and_checked() {
        assert_eq!(check_email(Some(" Ada@Example.COM ")).unwrap(), "ada@example.com");
        assert!(check_email(Some("no-at-sign")).is_err());
        assert!(check_email(Some("@example.com")).is_err());
        assert!(check_email(None).is_err());
    }

    #[test]
    fn short_password_rejected() {
        assert!(check_password("password", Some("short")).is_err());
        assert!(check_password("password", Some("longenough")).is_ok());
    }

    #[test]
    fn blank_country_becomes_none() {
        assert_eq!(clean_country(Some("  ".to_string())), None);
        assert_eq!(clean_country(Some(" NZ ".to_string())).as_deref(), Some("NZ"));
    }
}
