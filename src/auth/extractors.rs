use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Authorization gate: extracts the bearer token, verifies it, and hands the
/// verified subject to the handler. A missing header (or wrong scheme) is "no
/// token" and rejects 401; a token that is present but fails verification
/// rejects 403. No database access happens here.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::message(StatusCode::UNAUTHORIZED, "Missing Authorization Header")
            })?;

        let mut segments = auth_header.split_whitespace();
        if segments.next() != Some("Bearer") {
            return Err(ApiError::message(
                StatusCode::UNAUTHORIZED,
                "Missing Authorization Header",
            ));
        }

        // "Bearer" with no second segment is a present-but-invalid token, not
        // a missing one; the empty string falls through verification below.
        let token = segments.next().unwrap_or("");

        match keys.verify(token) {
            Some(claims) => Ok(AuthUser(claims.sub)),
            None => {
                warn!("invalid or expired token");
                Err(ApiError::message(
                    StatusCode::FORBIDDEN,
                    "Invalid or expired token.",
                ))
            }
        }
    }
}
