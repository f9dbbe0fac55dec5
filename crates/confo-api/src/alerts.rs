//! Handlers for `/alerts` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/alerts/by-user/:user_id` | Each alert joined with its document |
//! | `POST`  | `/alerts` | 201; 404 if the user or document is missing |
//! | `PATCH` | `/alerts/:id/read` | Always `{"success":true}`, even for unknown ids |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confo_core::{
  alert::{AlertWithDocument, NewAlert},
  store::ComplianceStore,
  validate::Validate as _,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::{ApiError, parse_body};

/// `GET /alerts/by-user/:user_id`
pub async fn list_by_user<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AlertWithDocument>>, ApiError>
where
  S: ComplianceStore,
{
  Ok(Json(store.alerts_by_user(user_id).await?))
}

/// `POST /alerts`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewAlert = parse_body(body)?;
  input.validate()?;
  let alert = store.create_alert(input).await?;
  Ok((StatusCode::CREATED, Json(alert)))
}

/// `PATCH /alerts/:id/read`
pub async fn mark_read<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  store.mark_alert_read(id).await?;
  Ok(Json(json!({ "success": true })))
}
