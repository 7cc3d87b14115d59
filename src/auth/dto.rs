use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for registration. Fields are optional at the wire level so
/// that presence is checked by the handler and answered with the shared
/// `Field(s) missing` body instead of a deserializer rejection. `gdpr`
/// defaults to false; an omitted flag is a refusal, not a missing field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub gdpr: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Registration response projection. Deliberately wider than the login one:
/// the source service returned first/last name only on registration, and that
/// asymmetry is preserved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub jwt: String,
    pub user: RegisteredUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub jwt: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub username: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}
