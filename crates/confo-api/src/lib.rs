//! JSON REST API for the ConfoUP compliance backend.
//!
//! Exposes an axum [`Router`] backed by any
//! [`confo_core::store::ComplianceStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility. The layer holds no state of its own —
//! every handler validates its input and delegates to the store.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", confo_api::api_router(store.clone()))
//! ```

pub mod alerts;
pub mod boxes;
pub mod documents;
pub mod error;
pub mod favorites;
pub mod profiles;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, patch, post},
};
use confo_core::store::ComplianceStore;

pub use error::ApiError;

#[cfg(test)]
mod tests;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ComplianceStore + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .route(
      "/users/by-firebase-uid/{uid}",
      get(users::get_by_firebase_uid::<S>),
    )
    // Profiles
    .route("/entreprise-profiles", post(profiles::create_entreprise::<S>))
    .route(
      "/entreprise-profiles/by-user/{user_id}",
      get(profiles::get_entreprise::<S>),
    )
    .route("/bureau-profiles", post(profiles::create_bureau::<S>))
    .route(
      "/bureau-profiles/by-user/{user_id}",
      get(profiles::get_bureau::<S>),
    )
    // BO documents
    .route(
      "/bo-documents",
      get(documents::list::<S>).post(documents::create::<S>),
    )
    .route("/bo-documents/latest", get(documents::latest::<S>))
    .route("/bo-documents/{id}", get(documents::get_one::<S>))
    // Alerts
    .route("/alerts", post(alerts::create::<S>))
    .route("/alerts/by-user/{user_id}", get(alerts::list_by_user::<S>))
    .route("/alerts/{id}/read", patch(alerts::mark_read::<S>))
    // Favorites
    .route("/favorites", post(favorites::create::<S>))
    .route(
      "/favorites/by-user/{user_id}",
      get(favorites::list_by_user::<S>),
    )
    .route("/favorites/{id}", delete(favorites::delete_one::<S>))
    // Entreprise boxes
    .route("/entreprise-boxes", post(boxes::create::<S>))
    .route(
      "/entreprise-boxes/by-bureau/{bureau_user_id}",
      get(boxes::list_by_bureau::<S>),
    )
    .route(
      "/entreprise-boxes/{id}",
      get(boxes::get_one::<S>).patch(boxes::update::<S>),
    )
    // Box alerts
    .route("/box-alerts", post(boxes::create_alert::<S>))
    .route("/box-alerts/by-box/{box_id}", get(boxes::list_alerts::<S>))
    .route("/box-alerts/{id}/resolve", patch(boxes::resolve_alert::<S>))
    .with_state(store)
}
