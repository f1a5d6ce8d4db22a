use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trips_subject() {
        let user_id = Uuid::now_v7();
        let token = encode_token(&Claims::new(user_id, Duration::minutes(5)), SECRET).unwrap();
        assert_eq!(decode_token(&token, SECRET).unwrap().sub, user_id);
        assert_eq!(crate::auth::authenticate(&token, SECRET).unwrap(), user_id);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token =
            encode_token(&Claims::new(Uuid::now_v7(), Duration::minutes(5)), SECRET).unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let token =
            encode_token(&Claims::new(Uuid::now_v7(), Duration::hours(-2)), SECRET).unwrap();
        assert!(crate::auth::authenticate(&token, SECRET).is_err());
    }
}
