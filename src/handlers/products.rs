//! Catalog handlers: list, read, create, update, delete under /products.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{PageFilter, ProductInput};
use crate::response;
use crate::service::ProductRepository;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

pub const PRODUCT_FIELDS_MISSING: &str = "Please provide name, price, stock, status and page";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_DELETED: &str = "Product deleted";

fn parse_id(id_str: &str) -> Option<i32> {
    id_str.trim().parse().ok()
}

/// GET /products?page=index|all|both
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = PageFilter::parse(params.get("page").map(String::as_str));
    let rows = state.bounded(ProductRepository::list(&state.pool, filter)).await?;
    Ok(response::ok(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str).ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))?;
    let row = state
        .bounded(ProductRepository::get_by_id(&state.pool, id))
        .await?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))?;
    Ok(response::ok(row))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let input = ProductInput::from_body(&body, PRODUCT_FIELDS_MISSING)?;
    let row = state.bounded(ProductRepository::create(&state.pool, &input)).await?;
    tracing::info!(id = row.id, name = %row.name, "product created");
    Ok(response::created(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str).ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))?;
    let input = ProductInput::from_body(&body, PRODUCT_FIELDS_MISSING)?;
    let row = state
        .bounded(ProductRepository::update(&state.pool, id, &input))
        .await?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))?;
    tracing::info!(id, "product updated");
    Ok(response::ok(row))
}

/// Succeeds whether or not the id exists; a non-numeric id cannot match a row.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(id) = parse_id(&id_str) {
        state.bounded(ProductRepository::delete(&state.pool, id)).await?;
        tracing::info!(id, "product deleted");
    }
    Ok(response::message(PRODUCT_DELETED))
}
