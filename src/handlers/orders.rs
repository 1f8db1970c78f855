//! Order handlers: POST /place-order, GET /orders/:username.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::OrderItem;
use crate::response;
use crate::service::validation::{decimal_field, is_empty, require, text_field, Body};
use crate::service::OrderRepository;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;

pub const ORDER_FIELDS_MISSING: &str = "Incomplete order data";
pub const ADMIN_CANNOT_ORDER: &str = "Admin accounts cannot place orders";
pub const ORDER_PLACED: &str = "Order placed";

/// Items must be a non-empty array of objects, each with a name and a numeric price.
fn order_items(body: &Body) -> Result<Vec<OrderItem>, AppError> {
    let missing = || AppError::Validation(ORDER_FIELDS_MISSING.into());
    let items = match body.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(missing()),
    };
    items
        .iter()
        .map(|item| {
            let item = item.as_object().ok_or_else(missing)?;
            if is_empty(item.get("name")) {
                return Err(missing());
            }
            Ok(OrderItem {
                name: text_field(item, "name", ORDER_FIELDS_MISSING)?,
                price: decimal_field(item, "price", ORDER_FIELDS_MISSING)?,
            })
        })
        .collect()
}

pub async fn place_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    require(&body, &["username", "items"], ORDER_FIELDS_MISSING)?;
    let username = text_field(&body, "username", ORDER_FIELDS_MISSING)?;
    let items = order_items(&body)?;

    let ids = state
        .bounded(OrderRepository::place_order(&state.pool, &username, &items, ADMIN_CANNOT_ORDER))
        .await?;
    tracing::info!(%username, lines = ids.len(), "order placed");
    Ok(response::message(ORDER_PLACED))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .bounded(OrderRepository::list_orders(&state.pool, &username))
        .await?;
    Ok(response::ok(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn body(v: Value) -> Body {
        match v {
            Value::Object(m) => m,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn items_keep_request_order() {
        let b = body(json!({ "username": "nok", "items": [
            { "name": "Tee", "price": 250 },
            { "name": "Cap", "price": "199.50" }
        ]}));
        let items = order_items(&b).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Tee");
        assert_eq!(items[0].price, Decimal::from(250));
        assert_eq!(items[1].price, "199.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn empty_or_malformed_items_are_rejected() {
        for v in [
            json!({ "items": [] }),
            json!({ "items": "Tee" }),
            json!({ "items": [ "Tee" ] }),
            json!({ "items": [ { "name": "", "price": 1 } ] }),
            json!({ "items": [ { "name": "Tee" } ] }),
            json!({ "items": [ { "name": "Tee", "price": "free" } ] }),
            json!({ "items": [ { "name": "Tee", "price": 1000000000000i64 } ] }),
        ] {
            assert!(matches!(order_items(&body(v)), Err(AppError::Validation(_))));
        }
    }
}
