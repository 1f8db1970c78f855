//! Shared application state for all routes. The pool is created once at startup.

use crate::error::AppError;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub store_timeout: Duration,
}

impl AppState {
    pub fn new(pool: PgPool, store_timeout: Duration) -> Self {
        AppState { pool, store_timeout }
    }

    /// Run one store operation under the per-request deadline.
    pub async fn bounded<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| AppError::StoreTimeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy_state(timeout: Duration) -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AppState::new(pool, timeout)
    }

    #[tokio::test]
    async fn slow_operations_become_store_timeouts() {
        let state = lazy_state(Duration::from_millis(10));
        let res: Result<(), AppError> = state
            .bounded(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(res, Err(AppError::StoreTimeout)));
    }

    #[tokio::test]
    async fn fast_operations_pass_through() {
        let state = lazy_state(Duration::from_secs(1));
        let res = state.bounded(async { Ok::<_, AppError>(42) }).await.unwrap();
        assert_eq!(res, 42);
    }
}
