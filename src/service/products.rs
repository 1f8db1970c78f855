//! `products` table: catalog listing and full-replace CRUD.

use crate::error::AppError;
use crate::models::{PageFilter, Product, ProductInput};
use crate::service::validation::{self, Body};
use sqlx::PgPool;

const PRODUCT_COLUMNS: &str = "id, name, price, stock, status, tag, page, image_url, updated_at";

/// Input names tried, in order, for the product image.
pub const IMAGE_FIELDS: &[&str] = &["image_url", "image"];

pub const REQUIRED_FIELDS: &[&str] = &["name", "price", "stock", "status", "page"];

impl ProductInput {
    /// Validate and shape a create/update body: required fields present, price and stock
    /// numeric, `image_url` taken from `image_url` or else `image`, blank tag stored as null.
    pub fn from_body(body: &Body, message: &str) -> Result<Self, AppError> {
        validation::require(body, REQUIRED_FIELDS, message)?;
        Ok(ProductInput {
            name: validation::text_field(body, "name", message)?,
            price: validation::decimal_field(body, "price", message)?,
            stock: validation::integer_field(body, "stock", message)?,
            status: validation::text_field(body, "status", message)?,
            tag: validation::optional_text(body, "tag"),
            page: validation::text_field(body, "page", message)?,
            image_url: validation::scalar_text(validation::first_present(body, IMAGE_FIELDS)),
        })
    }
}

pub struct ProductRepository;

impl ProductRepository {
    /// Newest first, optionally restricted to one page placement.
    pub async fn list(pool: &PgPool, filter: Option<PageFilter>) -> Result<Vec<Product>, AppError> {
        let rows = match filter {
            Some(page) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {} FROM products WHERE page = $1 ORDER BY id DESC",
                    PRODUCT_COLUMNS
                ))
                .bind(page.as_str())
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products ORDER BY id DESC", PRODUCT_COLUMNS))
                    .fetch_all(pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>, AppError> {
        let row = sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Returns the persisted row, including its generated id.
    pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products (name, price, stock, status, tag, page, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %input.name, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.stock)
            .bind(&input.status)
            .bind(&input.tag)
            .bind(&input.page)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Replace every column and stamp `updated_at`. `None` when no row has this id.
    pub async fn update(pool: &PgPool, id: i32, input: &ProductInput) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET name = $1, price = $2, stock = $3, status = $4, tag = $5, page = $6, \
             image_url = $7, updated_at = NOW() WHERE id = $8 RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.stock)
            .bind(&input.status)
            .bind(&input.tag)
            .bind(&input.page)
            .bind(&input.image_url)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Deleting an id that does not exist is not an error.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        tracing::debug!(id, rows = res.rows_affected(), "delete product");
        Ok(())
    }
}
