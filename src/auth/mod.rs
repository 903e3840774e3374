use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::database::models::UserRole;

pub mod policy;

/// Claims carried by session tokens this API issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, role: UserRole) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().auth.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            email,
            role,
            exp,
            iat: now.timestamp(),
        }
    }

    /// Seconds until expiry, as reported to clients at login.
    pub fn expires_in(&self) -> i64 {
        self.exp - self.iat
    }
}

/// Claims inside the identity token presented to POST /auth/login.
///
/// The trusted identity layer (the OAuth-facing gateway) signs these with
/// the shared provider secret after it has done the actual Google handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("{0}")]
    InvalidToken(String),
}

/// Issue a session token for an admitted user.
pub fn generate_session_token(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().auth.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate a session token from the Authorization header.
pub fn validate_session_token(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().auth.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(format!("Invalid or expired token: {}", e)))
}

/// Verify the identity token presented at login against the provider secret.
pub fn verify_identity_token(token: &str) -> Result<IdentityClaims, AuthError> {
    let secret = &config::config().auth.provider_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<IdentityClaims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(format!("Invalid identity token: {}", e)))
}

/// Mint an identity token locally. Development tooling for exercising
/// /auth/login without the real identity layer.
pub fn mint_identity_token(
    email: String,
    name: Option<String>,
    expiry_hours: i64,
) -> Result<String, AuthError> {
    let secret = &config::config().auth.provider_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let claims = IdentityClaims {
        email,
        name,
        picture: None,
        exp: (Utc::now() + Duration::hours(expiry_hours)).timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Dev preset secrets are non-empty, so round-trips work without env setup.

    #[test]
    fn test_session_token_round_trip() {
        let claims = Claims::new(Uuid::new_v4(), "user@example.com".to_string(), UserRole::User);
        let token = generate_session_token(&claims).unwrap();
        let decoded = validate_session_token(&token).unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.email, "user@example.com");
        assert_eq!(decoded.role, UserRole::User);
    }

    #[test]
    fn test_garbage_session_token_rejected() {
        assert!(validate_session_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_identity_token_round_trip() {
        let token =
            mint_identity_token("admin@example.com".to_string(), Some("Admin".to_string()), 1)
                .unwrap();
        let identity = verify_identity_token(&token).unwrap();
        assert_eq!(identity.email, "admin@example.com");
        assert_eq!(identity.name.as_deref(), Some("Admin"));
    }

    #[test]
    fn test_session_token_is_not_an_identity_token() {
        // Different secrets, so a session token must not pass identity verification.
        let claims = Claims::new(Uuid::new_v4(), "user@example.com".to_string(), UserRole::User);
        let token = generate_session_token(&claims).unwrap();
        assert!(verify_identity_token(&token).is_err());
    }

    #[test]
    fn test_expires_in_matches_config() {
        let claims = Claims::new(Uuid::new_v4(), "u@example.com".to_string(), UserRole::Admin);
        let hours = crate::config::config().auth.jwt_expiry_hours as i64;
        assert_eq!(claims.expires_in(), hours * 3600);
    }
}
