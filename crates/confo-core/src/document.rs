//! BO document — a regulatory bulletin from the Bulletin Officiel.
//!
//! Documents are immutable once published and read-heavy: created by an
//! ingestion process, then only ever listed, fetched, and joined against.
//! Titles and content carry French/Arabic variants; the `summary_*` fields
//! hold machine-generated digests when ingestion produced them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::FieldViolation,
  validate::{Validate, require, require_opt},
};

/// Editorial urgency of a bulletin.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Urgent,
  #[default]
  Medium,
  Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoDocument {
  pub id:           Uuid,
  pub title:        String,
  pub title_ar:     Option<String>,
  /// Official citation, e.g. `BO-2025-001`. Unique across all documents.
  pub reference:    String,
  pub publish_date: DateTime<Utc>,
  /// Free-text classification: `regulatory`, `legal`, `tax`, …
  pub category:     String,
  /// Business sector the bulletin affects, when it is sector-specific.
  pub sector:       Option<String>,
  pub content_fr:   String,
  pub content_ar:   Option<String>,
  pub summary_fr:   Option<String>,
  pub summary_ar:   Option<String>,
  pub priority:     Priority,
  pub pdf_url:      Option<String>,
}

/// Input to [`crate::store::ComplianceStore::create_bo_document`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBoDocument {
  pub title:        String,
  pub title_ar:     Option<String>,
  pub reference:    String,
  pub publish_date: DateTime<Utc>,
  pub category:     String,
  pub sector:       Option<String>,
  pub content_fr:   String,
  pub content_ar:   Option<String>,
  pub summary_fr:   Option<String>,
  pub summary_ar:   Option<String>,
  #[serde(default)]
  pub priority:     Priority,
  pub pdf_url:      Option<String>,
}

impl Validate for NewBoDocument {
  fn check(&self, violations: &mut Vec<FieldViolation>) {
    require(violations, "title", &self.title);
    require(violations, "reference", &self.reference);
    require(violations, "category", &self.category);
    require(violations, "contentFr", &self.content_fr);
    require_opt(violations, "pdfUrl", self.pdf_url.as_deref());
  }
}
