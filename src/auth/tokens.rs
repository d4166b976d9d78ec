//! Single-use, time-boxed tokens for email verification and password reset.
//!
//! Only the sha256 of a token is persisted; the raw value is handed to the
//! delivery channel once and never stored. Redemption clears the stored hash,
//! so a second attempt with the same token fails as invalid.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;
use crate::error::ApiError;

/// Freshly issued token: `raw` goes to the user, `token_hash` to storage.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub raw: String,
    pub token_hash: String,
}

pub fn issue() -> IssuedToken {
    // 256 bits of randomness, hex encoded
    let raw = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let token_hash = hash_token(&raw);
    IssuedToken { raw, token_hash }
}

pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a presented token against the stored hash and expiry. A consumed
/// token has `stored_hash = None` and fails exactly like an unknown or
/// expired one.
pub fn validate(
    raw: &str,
    stored_hash: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    let stored = stored_hash.ok_or_else(invalid)?;
    if hash_token(raw) != stored {
        return Err(invalid());
    }
    match expires_at {
        Some(deadline) if now <= deadline => Ok(()),
        _ => Err(invalid()),
    }
}

fn invalid() -> ApiError {
    ApiError::invalid_token("Token is invalid or has expired")
}

pub fn verification_expires_at(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::hours(config::config().security.verification_token_ttl_hours)
}

pub fn reset_expires_at(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(config::config().security.reset_token_ttl_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_before_expiry() {
        let now = Utc::now();
        let token = issue();
        assert!(validate(
            &token.raw,
            Some(&token.token_hash),
            Some(now + Duration::hours(24)),
            now
        )
        .is_ok());
    }

    #[test]
    fn expired_token_is_invalid() {
        let now = Utc::now();
        let token = issue();
        let err = validate(
            &token.raw,
            Some(&token.token_hash),
            Some(now - Duration::seconds(1)),
            now,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TOKEN");
    }

    #[test]
    fn consumed_token_is_invalid() {
        // Redemption clears the hash column; the same raw token must fail.
        let now = Utc::now();
        let token = issue();
        let err = validate(&token.raw, None, Some(now + Duration::hours(1)), now).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TOKEN");
    }

    #[test]
    fn wrong_token_is_invalid() {
        let now = Utc::now();
        let token = issue();
        let other = issue();
        assert!(validate(
            &other.raw,
            Some(&token.token_hash),
            Some(now + Duration::hours(1)),
            now
        )
        .is_err());
    }

    #[test]
    fn raw_token_is_never_its_own_hash() {
        let token = issue();
        assert_ne!(token.raw, token.token_hash);
        assert_eq!(token.token_hash.len(), 64);
    }
}
