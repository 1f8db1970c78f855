//! `orders` table: placing multi-item orders and reading a user's order history.

use crate::error::AppError;
use crate::models::{OrderItem, OrderLine, Role, ORDER_STATUS_RECEIVED};
use crate::service::UserRepository;
use sqlx::PgPool;

pub struct OrderRepository;

impl OrderRepository {
    /// Insert one row per item, all in a single transaction.
    /// Admin accounts are refused with [`AppError::Forbidden`] before anything is written.
    /// Usernames without an account are not rejected; the column is not a foreign key.
    pub async fn place_order(
        pool: &PgPool,
        username: &str,
        items: &[OrderItem],
        forbidden_message: &str,
    ) -> Result<Vec<i32>, AppError> {
        if items.is_empty() {
            return Err(AppError::Validation("order has no items".into()));
        }
        let mut tx = pool.begin().await?;
        if UserRepository::role_of(&mut *tx, username).await? == Some(Role::Admin) {
            return Err(AppError::Forbidden(forbidden_message.to_string()));
        }
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            tracing::debug!(%username, product = %item.name, "insert order line (tx)");
            let (id,): (i32,) = sqlx::query_as(
                "INSERT INTO orders (username, product_name, price, status) VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(username)
            .bind(&item.name)
            .bind(item.price)
            .bind(ORDER_STATUS_RECEIVED)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }
        tx.commit().await?;
        Ok(ids)
    }

    /// Newest first.
    pub async fn list_orders(pool: &PgPool, username: &str) -> Result<Vec<OrderLine>, AppError> {
        let rows = sqlx::query_as::<_, OrderLine>(
            "SELECT id, product_name AS name, price, status FROM orders WHERE username = $1 ORDER BY id DESC",
        )
        .bind(username)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
