//! Handlers for the onboarding-profile endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/entreprise-profiles` | 201; 409 if the user already has one |
//! | `GET`  | `/entreprise-profiles/by-user/:user_id` | 404 if absent |
//! | `POST` | `/bureau-profiles` | analogous |
//! | `GET`  | `/bureau-profiles/by-user/:user_id` | analogous |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confo_core::{
  profile::{
    BureauProfile, EntrepriseProfile, NewBureauProfile, NewEntrepriseProfile,
  },
  store::ComplianceStore,
  validate::Validate as _,
};
use uuid::Uuid;

use crate::error::{ApiError, parse_body};

// ─── Entreprise ──────────────────────────────────────────────────────────────

/// `POST /entreprise-profiles`
pub async fn create_entreprise<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewEntrepriseProfile = parse_body(body)?;
  input.validate()?;
  let profile = store.create_entreprise_profile(input).await?;
  Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /entreprise-profiles/by-user/:user_id`
pub async fn get_entreprise<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<EntrepriseProfile>, ApiError>
where
  S: ComplianceStore,
{
  let profile =
    store.get_entreprise_profile(user_id).await?.ok_or_else(|| {
      ApiError::NotFound(format!("no entreprise profile for user {user_id}"))
    })?;
  Ok(Json(profile))
}

// ─── Bureau ──────────────────────────────────────────────────────────────────

/// `POST /bureau-profiles`
pub async fn create_bureau<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewBureauProfile = parse_body(body)?;
  input.validate()?;
  let profile = store.create_bureau_profile(input).await?;
  Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /bureau-profiles/by-user/:user_id`
pub async fn get_bureau<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<Uuid>,
) -> Result<Json<BureauProfile>, ApiError>
where
  S: ComplianceStore,
{
  let profile = store.get_bureau_profile(user_id).await?.ok_or_else(|| {
    ApiError::NotFound(format!("no bureau profile for user {user_id}"))
  })?;
  Ok(Json(profile))
}
