//! Router assembly.

mod common;
mod shop;

pub use common::common_routes;
pub use shop::shop_routes;

use crate::config::AppConfig;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};

/// Full application: API routes, optional static files, CORS, body limit and request tracing.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(shop_routes(state));
    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }
    router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
