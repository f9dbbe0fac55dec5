//! Input validation for the insert types.
//!
//! Shape errors (missing fields, wrong primitive types, values outside an
//! enumerated set, unknown fields) are caught by serde: every insert type
//! derives `Deserialize` with `deny_unknown_fields`. What serde cannot
//! express — "required string must be non-empty" — is checked here.
//!
//! Validation is all-or-nothing: [`Validate::validate`] collects every
//! offending field and rejects the whole input in one
//! [`Error::Validation`](crate::Error::Validation). It runs before any store
//! mutation, so a rejected input never leaves a partial write behind.

use crate::{Error, Result, error::FieldViolation};

pub trait Validate {
  /// Append a violation for every field that fails its rule.
  fn check(&self, violations: &mut Vec<FieldViolation>);

  /// Run [`Validate::check`] and reject the input if anything was flagged.
  fn validate(&self) -> Result<()> {
    let mut violations = Vec::new();
    self.check(&mut violations);
    if violations.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation(violations))
    }
  }
}

/// Flag `field` if the required string is empty or whitespace.
pub fn require(
  violations: &mut Vec<FieldViolation>,
  field: &'static str,
  value: &str,
) {
  if value.trim().is_empty() {
    violations.push(FieldViolation { field, reason: "must not be empty" });
  }
}

/// Optional fields may be absent, but a present value must be non-empty.
pub fn require_opt(
  violations: &mut Vec<FieldViolation>,
  field: &'static str,
  value: Option<&str>,
) {
  if let Some(v) = value {
    require(violations, field, v);
  }
}
