//! HTTP handlers: accounts, profiles, orders, product catalog.

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;
