//! Session tokens for the server side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::{AuthUser, UserType};

use crate::error::AppError;

/// Tokens stay valid for a week.
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    user_type: UserType,
    user_id: i32,
    profile_id: i32,
}

pub fn issue_token(user: &AuthUser, secret: &str) -> Result<String, AppError> {
    let exp = chrono::Utc::now().timestamp() + TOKEN_TTL_SECS;
    let claims = Claims {
        sub: user.email.clone(),
        exp: exp as usize,
        user_type: user.user_type,
        user_id: user.user_id,
        profile_id: user.profile_id,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Unauthorized(format!("Failed to issue token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    let claims = token_data.claims;
    Ok(AuthUser {
        user_id: claims.user_id,
        profile_id: claims.profile_id,
        email: claims.sub,
        user_type: claims.user_type,
    })
}

/// Verifies the token and requires a client account.
pub fn require_client(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let user = verify_token(token, secret)?;
    if user.user_type != UserType::Client {
        return Err(AppError::Unauthorized(
            "only client accounts can book appointments".to_string(),
        ));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AuthUser {
        AuthUser {
            user_id: 12,
            profile_id: 3,
            email: "client@handybook.test".to_string(),
            user_type: UserType::Client,
        }
    }

    #[test]
    fn issued_token_verifies_back_to_the_same_user() {
        let token = issue_token(&client(), "secret").unwrap();
        assert_eq!(verify_token(&token, "secret").unwrap(), client());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token(&client(), "secret").unwrap();
        assert!(matches!(
            verify_token(&token, "other"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            verify_token("not-a-token", "secret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn professionals_cannot_book() {
        let pro = AuthUser {
            user_type: UserType::Professional,
            ..client()
        };
        let token = issue_token(&pro, "secret").unwrap();
        assert!(require_client(&token, "secret").is_err());
        assert!(require_client(&issue_token(&client(), "secret").unwrap(), "secret").is_ok());
    }
}
