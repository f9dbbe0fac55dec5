//! Handlers for `/bo-documents` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/bo-documents` | Full feed, insertion order |
//! | `GET`  | `/bo-documents/latest?limit=N` | Newest first; `limit` defaults to 10 |
//! | `GET`  | `/bo-documents/:id` | 404 if not found |
//! | `POST` | `/bo-documents` | Ingestion entry point; 409 on a duplicate reference |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use confo_core::{
  document::{BoDocument, NewBoDocument},
  store::ComplianceStore,
  validate::Validate as _,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, parse_body};

/// `GET /bo-documents`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<BoDocument>>, ApiError>
where
  S: ComplianceStore,
{
  Ok(Json(store.list_bo_documents().await?))
}

#[derive(Debug, Deserialize)]
pub struct LatestParams {
  pub limit: Option<usize>,
}

/// `GET /bo-documents/latest[?limit=N]`
pub async fn latest<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<LatestParams>,
) -> Result<Json<Vec<BoDocument>>, ApiError>
where
  S: ComplianceStore,
{
  let limit = params.limit.unwrap_or(10);
  Ok(Json(store.latest_bo_documents(limit).await?))
}

/// `GET /bo-documents/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<BoDocument>, ApiError>
where
  S: ComplianceStore,
{
  let document = store
    .get_bo_document(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("bo document {id} not found")))?;
  Ok(Json(document))
}

/// `POST /bo-documents`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewBoDocument = parse_body(body)?;
  input.validate()?;
  let document = store.create_bo_document(input).await?;
  Ok((StatusCode::CREATED, Json(document)))
}
