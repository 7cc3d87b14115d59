use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Boundary error: an HTTP status plus the exact JSON body sent to the client.
/// Internal detail never travels through here; it is logged at the call site.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// 400 for a request body missing required fields.
    pub fn fields_missing() -> Self {
        Self::new(StatusCode::BAD_REQUEST, json!({ "error": "Field(s) missing" }))
    }

    /// Domain-rule rejection with an error code and a human message.
    pub fn domain(status: StatusCode, error: &str, message: &str) -> Self {
        Self::new(status, json!({ "error": error, "message": message }))
    }

    /// Bare `{"message": ...}` body, used by the gate and not-found paths.
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, json!({ "message": message }))
    }

    /// Generic 500. The cause is logged server-side only.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Internal server error" }),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
