//! Entreprise boxes — companies managed on behalf of their owners by a
//! study-bureau user — and the alerts scoped to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  document::BoDocument,
  error::FieldViolation,
  validate::{Validate, require},
};

// ─── Boxes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxStatus {
  #[default]
  Active,
  Inactive,
}

/// A company managed by a bureau user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrepriseBox {
  pub id:                  Uuid,
  pub bureau_user_id:      Uuid,
  pub company_name:        String,
  pub sector:              String,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  pub status:              BoxStatus,
  pub created_at:          DateTime<Utc>,
}

/// Input to [`crate::store::ComplianceStore::create_entreprise_box`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEntrepriseBox {
  pub bureau_user_id:      Uuid,
  pub company_name:        String,
  pub sector:              String,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  #[serde(default)]
  pub status:              BoxStatus,
}

impl Validate for NewEntrepriseBox {
  fn check(&self, violations: &mut Vec<FieldViolation>) {
    require(violations, "companyName", &self.company_name);
    require(violations, "sector", &self.sector);
  }
}

/// Partial update for [`crate::store::ComplianceStore::update_entreprise_box`].
///
/// Absent fields keep their stored value (shallow merge). The owning bureau
/// user and `created_at` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntrepriseBoxPatch {
  pub company_name:        Option<String>,
  pub sector:              Option<String>,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  pub status:              Option<BoxStatus>,
}

impl EntrepriseBoxPatch {
  /// Fold the present fields over `existing`, leaving the rest untouched.
  pub fn apply(self, existing: &mut EntrepriseBox) {
    if let Some(v) = self.company_name {
      existing.company_name = v;
    }
    if let Some(v) = self.sector {
      existing.sector = v;
    }
    if let Some(v) = self.registration_number {
      existing.registration_number = Some(v);
    }
    if let Some(v) = self.activity_type {
      existing.activity_type = Some(v);
    }
    if let Some(v) = self.location {
      existing.location = Some(v);
    }
    if let Some(v) = self.status {
      existing.status = v;
    }
  }
}

impl Validate for EntrepriseBoxPatch {
  fn check(&self, violations: &mut Vec<FieldViolation>) {
    if let Some(v) = self.company_name.as_deref() {
      require(violations, "companyName", v);
    }
    if let Some(v) = self.sector.as_deref() {
      require(violations, "sector", v);
    }
  }
}

// ─── Box alerts ──────────────────────────────────────────────────────────────

/// An alert scoped to a managed company rather than directly to a user.
/// Only mutation: the one-way unresolved → resolved transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxAlert {
  pub id:             Uuid,
  pub box_id:         Uuid,
  pub bo_document_id: Uuid,
  pub is_resolved:    bool,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::ComplianceStore::create_box_alert`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBoxAlert {
  pub box_id:         Uuid,
  pub bo_document_id: Uuid,
}

impl Validate for NewBoxAlert {
  fn check(&self, _violations: &mut Vec<FieldViolation>) {}
}

// ─── Derived views ───────────────────────────────────────────────────────────

/// A box alert with its document joined in at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxAlertWithDocument {
  #[serde(flatten)]
  pub alert:    BoxAlert,
  pub document: BoDocument,
}

/// A box with all of its alerts (resolved and unresolved) materialised.
/// A box with no alerts carries an empty vec, never an absent field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxWithAlerts {
  #[serde(flatten)]
  pub entreprise_box: EntrepriseBox,
  pub alerts:         Vec<BoxAlertWithDocument>,
}
