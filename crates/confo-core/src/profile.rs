//! Role-specific profile entities, filled in during onboarding.
//!
//! Each profile is one-to-one with a user of the matching role. Profiles are
//! created once; no update contract exists.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::FieldViolation,
  validate::{Validate, require, require_opt},
};

// ─── Entreprise ──────────────────────────────────────────────────────────────

/// Onboarding detail for a user with the `entreprise` role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrepriseProfile {
  pub id:                  Uuid,
  pub user_id:             Uuid,
  pub company_name:        String,
  pub sector:              String,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  pub contact_person:      Option<String>,
}

/// Input to [`crate::store::ComplianceStore::create_entreprise_profile`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEntrepriseProfile {
  pub user_id:             Uuid,
  pub company_name:        String,
  pub sector:              String,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  pub contact_person:      Option<String>,
}

impl Validate for NewEntrepriseProfile {
  fn check(&self, violations: &mut Vec<FieldViolation>) {
    require(violations, "companyName", &self.company_name);
    require(violations, "sector", &self.sector);
  }
}

// ─── Bureau ──────────────────────────────────────────────────────────────────

/// Onboarding detail for a user with the `bureau` role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BureauProfile {
  pub id:                Uuid,
  pub user_id:           Uuid,
  pub organization_name: String,
  pub legal_identity:    Option<String>,
}

/// Input to [`crate::store::ComplianceStore::create_bureau_profile`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBureauProfile {
  pub user_id:           Uuid,
  pub organization_name: String,
  pub legal_identity:    Option<String>,
}

impl Validate for NewBureauProfile {
  fn check(&self, violations: &mut Vec<FieldViolation>) {
    require(violations, "organizationName", &self.organization_name);
    require_opt(violations, "legalIdentity", self.legal_identity.as_deref());
  }
}
