//! Extract a request body as a JSON object, rejecting with the standard `{ "message" }` body.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::service::validation::Body;

pub const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object";

/// Raw JSON object; field presence is checked by the handler.
#[derive(Clone, Debug)]
pub struct JsonBody(pub Body);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "unreadable body");
            AppError::BadRequest(INVALID_BODY_MESSAGE.into())
        })?;
        match value {
            Value::Object(map) => Ok(JsonBody(map)),
            _ => Err(AppError::BadRequest(INVALID_BODY_MESSAGE.into())),
        }
    }
}
