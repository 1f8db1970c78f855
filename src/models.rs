//! Row types for the `users`, `orders` and `products` tables and their API shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Username that is registered with the admin role.
pub const RESERVED_ADMIN_USERNAME: &str = "admin";

/// Status written on every newly placed order line.
pub const ORDER_STATUS_RECEIVED: &str = "received";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn for_username(username: &str) -> Self {
        if username == RESERVED_ADMIN_USERNAME {
            Role::Admin
        } else {
            Role::Customer
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

#[derive(Error, Debug)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            _ => Err(UnknownRole(value)),
        }
    }
}

/// Full `users` row, including the stored password hash.
#[derive(Clone, Debug, FromRow)]
pub struct User {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub address: Option<String>,
}

/// Customer listing row: no role, no password.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct CustomerSummary {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}

/// Body of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginReply {
    pub message: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

/// One line item of an order being placed. Name and price are snapshots, not product references.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
}

/// Order row as shown in a user's history.
#[derive(Clone, Debug, FromRow, Serialize)]
pub struct OrderLine {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: String,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub status: String,
    pub tag: Option<String>,
    pub page: String,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Validated product fields, written as a whole on create and update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub status: String,
    pub tag: Option<String>,
    pub page: String,
    pub image_url: Option<String>,
}

/// Display placement used to narrow catalog listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFilter {
    Index,
    All,
    Both,
}

impl PageFilter {
    /// Recognized values only; anything else means "no filter".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "index" => Some(PageFilter::Index),
            "all" => Some(PageFilter::All),
            "both" => Some(PageFilter::Both),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageFilter::Index => "index",
            PageFilter::All => "all",
            PageFilter::Both => "both",
        }
    }
}
