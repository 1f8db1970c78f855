//! Shop API routes: accounts, profiles, orders, catalog.

use crate::handlers::{auth, orders, products, users};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn shop_routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/update-address", post(users::update_address))
        .route("/update-phone", post(users::update_phone))
        .route("/users", get(users::list_customers))
        .route("/place-order", post(orders::place_order))
        .route("/orders/:username", get(orders::list_orders))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::read).put(products::update).delete(products::delete),
        )
        .with_state(state)
}
