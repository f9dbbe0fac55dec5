//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: [`NewUser`]; 201, or 409 on a taken email/uid |
//! | `GET`  | `/users/:id` | 404 if not found |
//! | `GET`  | `/users/by-firebase-uid/:uid` | 404 if no user is linked |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confo_core::{
  store::ComplianceStore,
  user::{NewUser, User},
  validate::Validate as _,
};
use uuid::Uuid;

use crate::error::{ApiError, parse_body};

/// `POST /users`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ComplianceStore,
{
  let input: NewUser = parse_body(body)?;
  input.validate()?;
  let user = store.create_user(input).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError>
where
  S: ComplianceStore,
{
  let user = store
    .get_user(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

/// `GET /users/by-firebase-uid/:uid`
pub async fn get_by_firebase_uid<S>(
  State(store): State<Arc<S>>,
  Path(uid): Path<String>,
) -> Result<Json<User>, ApiError>
where
  S: ComplianceStore,
{
  let user = store.get_user_by_firebase_uid(&uid).await?.ok_or_else(|| {
    ApiError::NotFound(format!("no user linked to firebase uid {uid}"))
  })?;
  Ok(Json(user))
}
