pub mod extractor;
pub mod jwt;
pub mod password;

use uuid::Uuid;

use crate::error::AppError;

/// Resolves a bearer credential to the id of the user it was issued for.
pub fn authenticate(token: &str, secret: &str) -> Result<Uuid, AppError> {
    jwt::decode_token(token, secret)
        .map(|claims| claims.sub)
        .map_err(|e| {
            tracing::debug!("Rejected token: {e}");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })
}
