use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::database::models::user::User;
use crate::error::ApiError;

/// Build the standard session payload: JWT plus the public user profile.
pub fn session_payload(user: &User) -> Result<Value, ApiError> {
    let role = user.role()?;
    let plan = user.plan()?;

    let claims = Claims::new(
        user.id,
        user.email.clone(),
        role,
        user.administrator_id,
        user.condominium_id,
        plan,
    );
    let expires_in = crate::config::config().security.jwt_expiry_hours * 3600;
    let token = generate_jwt(claims)?;

    Ok(json!({
        "success": true,
        "data": {
            "token": token,
            "user": user.to_public_json(),
            "expires_in": expires_in,
        }
    }))
}

/// Basic shape check; real validation is the mail round-trip.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::missing_field("email"));
    }
    if !trimmed.contains('@') || trimmed.len() > 254 {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert("email".to_string(), "Invalid email address".to_string());
        return Err(ApiError::validation_error("Invalid field format", Some(field_errors)));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::missing_field("password"));
    }
    if password.len() < 8 {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert(
            "password".to_string(),
            "Password must be at least 8 characters".to_string(),
        );
        return Err(ApiError::validation_error("Invalid field format", Some(field_errors)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn password_length_is_checked() {
        assert!(validate_password("long enough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("").is_err());
    }
}
