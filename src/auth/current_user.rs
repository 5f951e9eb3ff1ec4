use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use crate::config::Config;
use crate::errors::ApiError;
use super::jwt::verify_token;

/// The caller identified by the `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthenticated("Not authenticated"))?
        .to_str()
        .map_err(|_| ApiError::unauthenticated("Invalid authorization header"))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(ApiError::unauthenticated("Invalid authorization header")),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let config = req.app_data::<web::Data<Config>>().ok_or_else(|| ApiError::Internal {
        operation: "locate application config".to_string(),
    })?;
    let claims = verify_token(bearer_token(req)?, config)?;
    Ok(AuthenticatedUser {
        id: claims.user_id()?,
        username: claims.username,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
