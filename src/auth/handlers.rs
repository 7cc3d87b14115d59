use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use super::dto::{LoginRequest, MeResponse, RegisterRequest};
use super::extractors::AuthUser;
use super::jwt::JwtKeys;
use super::services::{self, AuthError, LoginInput, RegisterInput};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

fn map_register_error(err: AuthError) -> ApiError {
    match err {
        AuthError::InvalidPassword => ApiError::domain(
            StatusCode::BAD_REQUEST,
            "invalidPassword",
            "Invalid password.",
        ),
        AuthError::GdprNotAccepted => ApiError::domain(
            StatusCode::BAD_REQUEST,
            "gdprNotApproved",
            "GDPR not accepted.",
        ),
        AuthError::UserAlreadyExists => ApiError::domain(
            StatusCode::BAD_REQUEST,
            "exist",
            "The user already exists.",
        ),
        AuthError::UserNotFound => ApiError::internal(),
        AuthError::Internal(e) => {
            error!(error = %e, "registration failed");
            ApiError::internal()
        }
    }
}

fn map_login_error(err: AuthError) -> ApiError {
    match err {
        AuthError::UserNotFound => {
            ApiError::domain(StatusCode::NOT_FOUND, "userNotFound", "User not found.")
        }
        AuthError::InvalidPassword => ApiError::domain(
            StatusCode::UNAUTHORIZED,
            "invalidPassword",
            "Invalid password.",
        ),
        AuthError::Internal(e) => {
            error!(error = %e, "login failed");
            ApiError::internal()
        }
        _ => ApiError::internal(),
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (Some(username), Some(display_name), Some(first_name), Some(last_name), Some(password)) = (
        payload.username,
        payload.display_name,
        payload.first_name,
        payload.last_name,
        payload.password,
    ) else {
        return Err(ApiError::fields_missing());
    };

    let keys = JwtKeys::from_ref(&state);
    let input = RegisterInput {
        username,
        display_name,
        first_name,
        last_name,
        password,
        gdpr: payload.gdpr,
    };

    let response = services::register(&*state.store, &keys, &state.config.hash_secret, input)
        .await
        .map_err(map_register_error)?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::fields_missing());
    };

    let keys = JwtKeys::from_ref(&state);
    let response = services::login(
        &*state.store,
        &keys,
        &state.config.hash_secret,
        LoginInput { username, password },
    )
    .await
    .map_err(map_login_error)?;

    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state
        .store
        .find_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "user lookup failed");
            ApiError::internal()
        })?
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": "User not found" }),
            )
        })?;

    Ok(Json(MeResponse {
        username: user.username,
        display_name: user.display_name,
        first_name: user.first_name,
        last_name: user.last_name,
    }))
}
