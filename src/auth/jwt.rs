//! JWT access token creation and verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::user::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // user id
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.sub
            .parse()
            .map_err(|_| ApiError::unauthenticated("Invalid token"))
    }
}

pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

pub fn create_token(user: &User, config: &Config) -> Result<IssuedToken, ApiError> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(config.jwt_expiry)
        .ok_or_else(|| ApiError::Internal {
            operation: format!("compute JWT expiry from {:?}", config.jwt_expiry),
        })?;
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &key).map_err(|e| ApiError::Internal {
        operation: format!("create JWT: {}", e),
    })?;

    Ok(IssuedToken {
        token,
        expires_in: config.jwt_expiry.num_seconds(),
    })
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => ApiError::unauthenticated("Token has expired"),
            ErrorKind::InvalidKeyFormat | ErrorKind::Crypto(_) => ApiError::Internal {
                operation: format!("verify JWT: {}", e),
            },
            _ => ApiError::unauthenticated("Invalid token"),
        })
}
