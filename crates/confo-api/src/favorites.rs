//! Handlers for `/favorites` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/favorites/by-user/:user_id` | |
//! | `POST`   | `/favorites` | 201; 404 if the user or document is missing |
//! | `DELETE` | `/favorites/:id` | Idempotent; unknown ids succeed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confo_core::{
  alert::{Favorite, NewFavorite},
  store::ComplianceStore,
  validate::Validate as _,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::{ApiError, parse_body};

/// `GET /favorites/by-user/:user_id`
pub async fn list_by_user<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Favorite>>, ApiError>
where
  S: ComplianceStore,
{
  Ok(Json(store.favorites_by_user(user_id).await?))
}

/// `POST /favorites`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewFavorite = parse_body(body)?;
  input.validate()?;
  let favorite = store.create_favorite(input).await?;
  Ok((StatusCode::CREATED, Json(favorite)))
}

/// `DELETE /favorites/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  store.delete_favorite(id).await?;
  Ok(Json(json!({ "success": true })))
}
