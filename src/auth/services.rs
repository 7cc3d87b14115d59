use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{LoginResponse, LoginUser, RegisterResponse, RegisteredUser};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use crate::store::{IdentityStore, User};

/// Passwords shorter than this are rejected before the hashing primitive is
/// ever invoked.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid password")]
    InvalidPassword,
    #[error("gdpr not accepted")]
    GdprNotAccepted,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct RegisterInput {
    pub username: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub gdpr: bool,
}

#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Registers a new user: validate, hash, check for a duplicate, issue the
/// token, persist. Persistence comes last, so no record exists after any
/// earlier rejection. The store's uniqueness rule backs the existence check,
/// so two racing registrations cannot both insert.
pub async fn register(
    store: &dyn IdentityStore,
    keys: &JwtKeys,
    hash_secret: &str,
    input: RegisterInput,
) -> Result<RegisterResponse, AuthError> {
    if input.password.len() < MIN_PASSWORD_LEN {
        warn!(username = %input.username, "registration with invalid password");
        return Err(AuthError::InvalidPassword);
    }
    let password_hash = hash_password(&input.password, hash_secret)?;

    if !input.gdpr {
        warn!(username = %input.username, "registration without gdpr approval");
        return Err(AuthError::GdprNotAccepted);
    }

    if store
        .find_user_by_username(&input.username)
        .await?
        .is_some()
    {
        warn!(username = %input.username, "registration for existing username");
        return Err(AuthError::UserAlreadyExists);
    }

    let user = User {
        id: Uuid::new_v4(),
        username: input.username,
        display_name: input.display_name,
        first_name: input.first_name,
        last_name: input.last_name,
        password_hash,
        gdpr_accepted: true,
        is_admin: false,
    };

    let jwt = keys.sign(user.id)?;

    if !store.insert_user(&user).await? {
        // Lost a check-then-insert race against a concurrent registration.
        warn!(username = %user.username, "duplicate username on insert");
        return Err(AuthError::UserAlreadyExists);
    }

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(RegisterResponse {
        jwt,
        user: RegisteredUser {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            first_name: user.first_name,
            last_name: user.last_name,
        },
    })
}

/// Logs a user in: lookup, verify the password against the stored hash, issue
/// a fresh token. Note the narrower user projection than registration.
pub async fn login(
    store: &dyn IdentityStore,
    keys: &JwtKeys,
    hash_secret: &str,
    input: LoginInput,
) -> Result<LoginResponse, AuthError> {
    let user = store
        .find_user_by_username(&input.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %input.username, "login for unknown username");
            AuthError::UserNotFound
        })?;

    if input.password.len() < MIN_PASSWORD_LEN {
        warn!(username = %input.username, "login with degenerate password");
        return Err(AuthError::InvalidPassword);
    }

    if !verify_password(&input.password, &user.password_hash, hash_secret) {
        warn!(username = %input.username, user_id = %user.id, "login with invalid password");
        return Err(AuthError::InvalidPassword);
    }

    let jwt = keys.sign(user.id)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(LoginResponse {
        jwt,
        user: LoginUser {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        },
    })
}
