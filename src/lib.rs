//! Clothing store backend: accounts, orders and product catalog over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, shop_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
