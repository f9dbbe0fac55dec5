//! User — the account record every other entity hangs off.
//!
//! A user holds identity metadata only; role-specific detail lives in the
//! profile entities. Sign-in itself is handled by an external auth provider;
//! `firebase_uid` links a user to that provider's identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::FieldViolation,
  validate::{Validate, require, require_opt},
};

/// The role a user signed up with. Immutable after creation — there is no
/// user-update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  /// A company tracking bulletins that affect its sector.
  Entreprise,
  /// An individual reader with favorites.
  Particulier,
  /// A study bureau managing companies (boxes) on their behalf.
  Bureau,
}

impl std::fmt::Display for UserRole {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::Entreprise => "entreprise",
      Self::Particulier => "particulier",
      Self::Bureau => "bureau",
    })
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:           Uuid,
  /// Unique across all users.
  pub email:        String,
  pub display_name: String,
  pub role:         UserRole,
  /// Unique external-identity linkage; absent for users created before
  /// provider sign-in.
  pub firebase_uid: Option<String>,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::ComplianceStore::create_user`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
  pub email:        String,
  pub display_name: String,
  pub role:         UserRole,
  pub firebase_uid: Option<String>,
}

impl Validate for NewUser {
  fn check(&self, violations: &mut Vec<FieldViolation>) {
    require(violations, "email", &self.email);
    if !self.email.is_empty() && !self.email.contains('@') {
      violations.push(FieldViolation {
        field:  "email",
        reason: "not an email address",
      });
    }
    require(violations, "displayName", &self.display_name);
    require_opt(violations, "firebaseUid", self.firebase_uid.as_deref());
  }
}
