//! Per-user notifications and bookmarks over BO documents.
//!
//! Both entities are id-pairs: a user on one side, a document on the other.
//! An alert's only mutation is the one-way unread → read transition; a
//! favorite's only mutation is deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{document::BoDocument, error::FieldViolation, validate::Validate};

// ─── Alerts ──────────────────────────────────────────────────────────────────

/// Flags a document a user should review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
  pub id:             Uuid,
  pub user_id:        Uuid,
  pub bo_document_id: Uuid,
  pub is_read:        bool,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::ComplianceStore::create_alert`].
/// New alerts always start unread.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAlert {
  pub user_id:        Uuid,
  pub bo_document_id: Uuid,
}

impl Validate for NewAlert {
  // Both fields are ids; serde typing is the whole check.
  fn check(&self, _violations: &mut Vec<FieldViolation>) {}
}

/// An alert with its referenced document joined in at read time.
/// Never stored — the store materialises it per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertWithDocument {
  #[serde(flatten)]
  pub alert:    Alert,
  pub document: BoDocument,
}

// ─── Favorites ───────────────────────────────────────────────────────────────

/// A bookmark from a particulier user to a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
  pub id:             Uuid,
  pub user_id:        Uuid,
  pub bo_document_id: Uuid,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::ComplianceStore::create_favorite`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewFavorite {
  pub user_id:        Uuid,
  pub bo_document_id: Uuid,
}

impl Validate for NewFavorite {
  fn check(&self, _violations: &mut Vec<FieldViolation>) {}
}
