//! JWT (JSON Web Token) utilities.
//!
//! Tokens are HS256-signed with the process-wide secret from [`JwtConfig`].
//! Verification checks signature and expiry only; resolving the subject to a
//! user is the caller's job.
//!
//! # Example
//!
//! ```ignore
//! use medibase_auth::{create_access_token, verify_token};
//! use medibase_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("64b0f3e2c9", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use medibase_config::JwtConfig;
use medibase_core::AppError;

use crate::claims::Claims;
use crate::error::AuthError;

/// Creates an access token whose subject is written to the `userId` claim.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(user_id: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = issue_window(jwt_config);
    sign_claims(
        &Claims {
            user_id: Some(user_id.to_string()),
            id: None,
            exp,
            iat,
        },
        jwt_config,
    )
}

/// Creates a token using the legacy `id` claim, as older issuers did.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_legacy_token(user_id: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = issue_window(jwt_config);
    sign_claims(
        &Claims {
            user_id: None,
            id: Some(user_id.to_string()),
            exp,
            iat,
        },
        jwt_config,
    )
}

/// Signs arbitrary claims with the configured secret.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn sign_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredential`] for every failure: bad signature,
/// malformed token or payload, expired token. The underlying reason is logged
/// at debug level only.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(reason = ?e.kind(), "Token verification failed");
        AuthError::InvalidCredential
    })
}

fn issue_window(jwt_config: &JwtConfig) -> (usize, usize) {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;
    (now.max(0) as usize, exp.max(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify_access_token() {
        let config = test_config();
        let token = create_access_token("u1", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("u1"));
        assert_eq!(claims.subject(), Some("u1"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_legacy_token_subject() {
        let config = test_config();
        let token = create_legacy_token("u2", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, None);
        assert_eq!(claims.subject(), Some("u2"));
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let token = create_access_token("u1", &test_config()).unwrap();
        let other = JwtConfig {
            secret: "different_secret_key".to_string(),
            access_token_expiry: 3600,
        };

        assert_eq!(verify_token(&token, &other), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn test_verify_token_garbage_and_empty() {
        let config = test_config();
        assert_eq!(
            verify_token("invalid.token.here", &config),
            Err(AuthError::InvalidCredential)
        );
        assert_eq!(verify_token("", &config), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn test_verify_token_expired() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let token = sign_claims(
            &Claims {
                user_id: Some("u1".to_string()),
                id: None,
                exp: now - 7200,
                iat: now - 10800,
            },
            &config,
        )
        .unwrap();

        assert_eq!(verify_token(&token, &config), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn test_verify_token_without_subject_still_verifies() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let token = sign_claims(
            &Claims {
                exp: now + 600,
                iat: now,
                ..Default::default()
            },
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_token_with_numeric_subject_verifies() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "userId": 1042, "exp": now + 600, "iat": now }),
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.subject(), Some("1042"));
    }
}
