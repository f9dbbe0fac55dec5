//! Handlers for `/entreprise-boxes` and `/box-alerts` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/entreprise-boxes/by-bureau/:bureau_user_id` | Boxes with alerts materialised |
//! | `GET`   | `/entreprise-boxes/:id` | 404 if not found |
//! | `POST`  | `/entreprise-boxes` | 201; 400 if the owner is not a bureau user |
//! | `PATCH` | `/entreprise-boxes/:id` | Partial update; 404 on an unknown id |
//! | `GET`   | `/box-alerts/by-box/:box_id` | Each alert joined with its document |
//! | `POST`  | `/box-alerts` | 201; 404 if the box or document is missing |
//! | `PATCH` | `/box-alerts/:id/resolve` | Always `{"success":true}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confo_core::{
  boxes::{
    BoxAlertWithDocument, BoxWithAlerts, EntrepriseBox, EntrepriseBoxPatch,
    NewBoxAlert, NewEntrepriseBox,
  },
  store::ComplianceStore,
  validate::Validate as _,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::{ApiError, parse_body};

// ─── Boxes ───────────────────────────────────────────────────────────────────

/// `GET /entreprise-boxes/by-bureau/:bureau_user_id`
pub async fn list_by_bureau<S>(
  State(store): State<Arc<S>>,
  Path(bureau_user_id): Path<Uuid>,
) -> Result<Json<Vec<BoxWithAlerts>>, ApiError>
where
  S: ComplianceStore,
{
  Ok(Json(store.boxes_by_bureau(bureau_user_id).await?))
}

/// `GET /entreprise-boxes/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<EntrepriseBox>, ApiError>
where
  S: ComplianceStore,
{
  let bo = store.get_entreprise_box(id).await?.ok_or_else(|| {
    ApiError::NotFound(format!("entreprise box {id} not found"))
  })?;
  Ok(Json(bo))
}

/// `POST /entreprise-boxes`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewEntrepriseBox = parse_body(body)?;
  input.validate()?;
  let bo = store.create_entreprise_box(input).await?;
  Ok((StatusCode::CREATED, Json(bo)))
}

/// `PATCH /entreprise-boxes/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<serde_json::Value>,
) -> Result<Json<EntrepriseBox>, ApiError>
where
  S: ComplianceStore,
{
  let patch: EntrepriseBoxPatch = parse_body(body)?;
  patch.validate()?;
  let bo = store.update_entreprise_box(id, patch).await?;
  Ok(Json(bo))
}

// ─── Box alerts ──────────────────────────────────────────────────────────────

/// `GET /box-alerts/by-box/:box_id`
pub async fn list_alerts<S>(
  State(store): State<Arc<S>>,
  Path(box_id): Path<Uuid>,
) -> Result<Json<Vec<BoxAlertWithDocument>>, ApiError>
where
  S: ComplianceStore,
{
  Ok(Json(store.box_alerts_by_box(box_id).await?))
}

/// `POST /box-alerts`
pub async fn create_alert<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewBoxAlert = parse_body(body)?;
  input.validate()?;
  let alert = store.create_box_alert(input).await?;
  Ok((StatusCode::CREATED, Json(alert)))
}

/// `PATCH /box-alerts/:id/resolve`
pub async fn resolve_alert<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  store.mark_box_alert_resolved(id).await?;
  Ok(Json(json!({ "success": true })))
}
