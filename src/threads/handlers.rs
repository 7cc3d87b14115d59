use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, instrument};
use uuid::Uuid;

use super::dto::{coerce_price, AllThreadsResponse, ThreadRequest, ThreadView, UserThreadsResponse};
use super::services::{self, now_millis, NewThread, ThreadError};
use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::ThreadUpdate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/thread/new", post(create_thread))
        .route("/thread/all", get(all_threads))
        .route("/thread/user", get(user_threads))
        .route(
            "/thread/:id",
            get(get_thread).patch(update_thread).delete(delete_thread),
        )
}

fn invalid_price() -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, json!({ "error": "Invalid price" }))
}

fn not_found() -> ApiError {
    ApiError::message(StatusCode::NOT_FOUND, "Thread not found")
}

fn map_thread_error(err: ThreadError, context: &str) -> ApiError {
    match err {
        ThreadError::NotFound => not_found(),
        ThreadError::Internal(e) => {
            error!(error = %e, "{context}");
            ApiError::internal()
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ThreadRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (Some(title), Some(sub_title), Some(banner), Some(desc), Some(price)) = (
        payload.title,
        payload.sub_title,
        payload.base64_banner,
        payload.desc,
        payload.price,
    ) else {
        return Err(ApiError::fields_missing());
    };

    let price = coerce_price(&price).filter(|p| *p >= 0.0).ok_or_else(invalid_price)?;

    let input = NewThread {
        title,
        sub_title,
        banner_image: banner,
        description: desc,
        price,
    };
    services::create_thread(&*state.store, user_id, input)
        .await
        .map_err(|e| match e {
            ThreadError::Internal(e) => {
                error!(error = %e, "thread creation failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to create thread" }),
                )
            }
            ThreadError::NotFound => ApiError::internal(),
        })?;

    Ok(Json(json!({ "success": "Thread created successfully" })))
}

#[instrument(skip(state))]
pub async fn all_threads(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<AllThreadsResponse>, ApiError> {
    let threads = services::all_threads(&*state.store)
        .await
        .map_err(|e| map_thread_error(e, "listing all threads failed"))?;

    let threads: Vec<ThreadView> = threads.into_iter().map(ThreadView::from).collect();
    Ok(Json(AllThreadsResponse {
        updated_at: now_millis(),
        length: threads.len(),
        threads,
    }))
}

#[instrument(skip(state))]
pub async fn user_threads(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserThreadsResponse>, ApiError> {
    let threads = services::owner_threads(&*state.store, user_id)
        .await
        .map_err(|e| map_thread_error(e, "listing user threads failed"))?;

    let threads: Vec<ThreadView> = threads.into_iter().map(ThreadView::from).collect();
    Ok(Json(UserThreadsResponse {
        iat: now_millis(),
        length: threads.len(),
        threads,
    }))
}

#[instrument(skip(state))]
pub async fn get_thread(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ThreadView>, ApiError> {
    let thread = services::thread_by_id(&*state.store, id)
        .await
        .map_err(|e| map_thread_error(e, "thread lookup failed"))?;
    Ok(Json(ThreadView::from(thread)))
}

#[instrument(skip(state, payload))]
pub async fn update_thread(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ThreadRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // userId must be present in the body, but ownership never moves: only the
    // content fields are replaced.
    let (Some(title), Some(sub_title), Some(banner), Some(desc), Some(price), Some(_user_id)) = (
        payload.title,
        payload.sub_title,
        payload.base64_banner,
        payload.desc,
        payload.price,
        payload.user_id,
    ) else {
        return Err(ApiError::fields_missing());
    };

    let price = coerce_price(&price).filter(|p| *p >= 0.0).ok_or_else(invalid_price)?;

    let update = ThreadUpdate {
        title,
        sub_title,
        banner_image: banner,
        description: desc,
        price,
    };
    services::update_thread(&*state.store, id, update)
        .await
        .map_err(|e| map_thread_error(e, "thread update failed"))?;

    Ok(Json(json!({ "message": "Thread updated successfully" })))
}

#[instrument(skip(state))]
pub async fn delete_thread(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services::delete_thread(&*state.store, id)
        .await
        .map_err(|e| map_thread_error(e, "thread delete failed"))?;

    Ok(Json(json!({ "message": "Thread deleted successfully" })))
}
