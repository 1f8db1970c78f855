//! Account handlers: POST /register, POST /login.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{LoginReply, Role};
use crate::password;
use crate::response;
use crate::service::validation::{require, text_field};
use crate::service::{NewUser, UserRepository};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub const REGISTER_FIELDS_MISSING: &str = "Please fill in every field";
pub const USERNAME_TAKEN: &str = "This username is already taken";
pub const REGISTERED: &str = "Registration successful";
pub const LOGIN_FIELDS_MISSING: &str = "Please enter your username and password";
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";
pub const WRONG_PASSWORD: &str = "Incorrect password";
pub const LOGGED_IN: &str = "Login successful";

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    require(&body, &["username", "email", "phone", "password"], REGISTER_FIELDS_MISSING)?;
    let username = text_field(&body, "username", REGISTER_FIELDS_MISSING)?;
    let email = text_field(&body, "email", REGISTER_FIELDS_MISSING)?;
    let phone = text_field(&body, "phone", REGISTER_FIELDS_MISSING)?;
    let password = text_field(&body, "password", REGISTER_FIELDS_MISSING)?;

    if state.bounded(UserRepository::exists_by_username(&state.pool, &username)).await? {
        return Err(AppError::Conflict(USERNAME_TAKEN.into()));
    }

    let role = Role::for_username(&username);
    let password_hash = password::hash_password_blocking(password).await?;
    let new_user = NewUser {
        username: &username,
        email: &email,
        phone: &phone,
        password: &password_hash,
        role,
    };
    state
        .bounded(UserRepository::create(&state.pool, &new_user, USERNAME_TAKEN))
        .await?;
    tracing::info!(%username, role = role.as_str(), "user registered");
    Ok(response::message(REGISTERED))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    require(&body, &["username", "password"], LOGIN_FIELDS_MISSING)?;
    let username = text_field(&body, "username", LOGIN_FIELDS_MISSING)?;
    let password = text_field(&body, "password", LOGIN_FIELDS_MISSING)?;

    let user = state
        .bounded(UserRepository::find_by_username(&state.pool, &username))
        .await?
        .ok_or_else(|| AppError::Unauthorized(ACCOUNT_NOT_FOUND.into()))?;

    if !password::verify_password_blocking(password, user.password).await? {
        tracing::info!(%username, "login rejected");
        return Err(AppError::Unauthorized(WRONG_PASSWORD.into()));
    }

    Ok(response::ok(LoginReply {
        message: LOGGED_IN.into(),
        username: user.username,
        email: user.email,
        phone: user.phone,
        role: user.role,
    }))
}
