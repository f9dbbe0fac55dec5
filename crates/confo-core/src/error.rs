//! Error types for `confo-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::user::UserRole;

/// A single rejected input field: which field, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
  pub field:  &'static str,
  pub reason: &'static str,
}

impl std::fmt::Display for FieldViolation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.field, self.reason)
  }
}

fn join_violations(violations: &[FieldViolation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

#[derive(Debug, Error)]
pub enum Error {
  /// Input rejected before any mutation. Lists every offending field.
  #[error("validation failed: {}", join_violations(.0))]
  Validation(Vec<FieldViolation>),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("bo document not found: {0}")]
  DocumentNotFound(Uuid),

  #[error("entreprise box not found: {0}")]
  BoxNotFound(Uuid),

  #[error("email already registered: {0}")]
  EmailInUse(String),

  #[error("firebase uid already linked: {0}")]
  FirebaseUidInUse(String),

  #[error("document reference already published: {0}")]
  ReferenceInUse(String),

  #[error("user {0} already has a profile")]
  ProfileExists(Uuid),

  #[error("user {user_id} does not have the {expected} role")]
  WrongRole { user_id: Uuid, expected: UserRole },

  /// Failure inside a storage backend (I/O, SQL, encoding). The cause is
  /// preserved for logging; callers surface a generic message.
  #[error("storage backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend-specific failure.
  pub fn backend(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Backend(Box::new(e))
  }

  /// True for uniqueness violations (HTTP 409 territory).
  pub fn is_conflict(&self) -> bool {
    matches!(
      self,
      Self::EmailInUse(_)
        | Self::FirebaseUidInUse(_)
        | Self::ReferenceInUse(_)
        | Self::ProfileExists(_)
    )
  }

  /// True when a referenced entity is absent (HTTP 404 territory).
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::UserNotFound(_) | Self::DocumentNotFound(_) | Self::BoxNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
