//! Profile and customer-listing handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response;
use crate::service::validation::{require, text_field};
use crate::service::UserRepository;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub const PROFILE_FIELDS_MISSING: &str = "Incomplete data";
pub const ADDRESS_UPDATED: &str = "Address updated";
pub const PHONE_UPDATED: &str = "Phone number updated";

/// POST /update-address
pub async fn update_address(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    require(&body, &["username", "address"], PROFILE_FIELDS_MISSING)?;
    let username = text_field(&body, "username", PROFILE_FIELDS_MISSING)?;
    let address = text_field(&body, "address", PROFILE_FIELDS_MISSING)?;
    state
        .bounded(UserRepository::update_address(&state.pool, &username, &address))
        .await?;
    Ok(response::message(ADDRESS_UPDATED))
}

/// POST /update-phone
pub async fn update_phone(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    require(&body, &["username", "phone"], PROFILE_FIELDS_MISSING)?;
    let username = text_field(&body, "username", PROFILE_FIELDS_MISSING)?;
    let phone = text_field(&body, "phone", PROFILE_FIELDS_MISSING)?;
    state
        .bounded(UserRepository::update_phone(&state.pool, &username, &phone))
        .await?;
    Ok(response::message(PHONE_UPDATED))
}

/// GET /users
pub async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.bounded(UserRepository::list_customers(&state.pool)).await?;
    Ok(response::ok(rows))
}
