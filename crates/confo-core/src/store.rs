//! The `ComplianceStore` trait — the single seam all entity access flows
//! through.
//!
//! The trait is implemented by storage backends (`confo-store-memory`,
//! `confo-store-sqlite`). Higher layers (`confo-api`, `confo-server`) depend
//! on this abstraction, not on any concrete backend.
//!
//! Every method returns a `Send` future so the trait can be used in
//! multi-threaded async runtimes (tokio with `axum`). Inputs are expected to
//! be validated (see [`crate::validate`]) before they reach the store; the
//! store enforces the relational contracts — uniqueness, referenced-entity
//! existence — that the schema layer cannot see.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  alert::{Alert, AlertWithDocument, Favorite, NewAlert, NewFavorite},
  boxes::{
    BoxAlert, BoxAlertWithDocument, BoxWithAlerts, EntrepriseBox,
    EntrepriseBoxPatch, NewBoxAlert, NewEntrepriseBox,
  },
  document::{BoDocument, NewBoDocument},
  profile::{
    BureauProfile, EntrepriseProfile, NewBureauProfile, NewEntrepriseProfile,
  },
  user::{NewUser, User},
};

/// Abstraction over a ConfoUP storage backend.
///
/// Contracts every implementation must uphold:
///
/// - each operation is atomic — no partial write is ever observable;
/// - uniqueness of `email`, `firebase_uid`, document `reference`, and one
///   profile per user is enforced with [`Error`](crate::Error) conflicts;
/// - creates verify their referenced entities exist (restrict-at-create),
///   so the inner joins of the derived views can never dangle;
/// - mark-read, mark-resolved, and delete-favorite succeed silently on
///   unknown ids.
pub trait ComplianceStore: Send + Sync {
  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. Fails with a conflict if the email or firebase
  /// uid is already taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>>> + Send + '_;

  /// Look a user up by the external auth provider's uid. At most one user
  /// can match.
  fn get_user_by_firebase_uid<'a>(
    &'a self,
    uid: &'a str,
  ) -> impl Future<Output = Result<Option<User>>> + Send + 'a;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Create the onboarding profile for an entreprise user. Fails if the
  /// user is missing, has a different role, or already has a profile.
  fn create_entreprise_profile(
    &self,
    input: NewEntrepriseProfile,
  ) -> impl Future<Output = Result<EntrepriseProfile>> + Send + '_;

  /// Profile lookup is by the owning user, not the profile id.
  fn get_entreprise_profile(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<EntrepriseProfile>>> + Send + '_;

  /// Create the onboarding profile for a bureau user. Same failure modes
  /// as [`ComplianceStore::create_entreprise_profile`].
  fn create_bureau_profile(
    &self,
    input: NewBureauProfile,
  ) -> impl Future<Output = Result<BureauProfile>> + Send + '_;

  fn get_bureau_profile(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<BureauProfile>>> + Send + '_;

  // ── BO documents ──────────────────────────────────────────────────────

  /// Persist a bulletin. Fails with a conflict if the official reference
  /// is already published.
  fn create_bo_document(
    &self,
    input: NewBoDocument,
  ) -> impl Future<Output = Result<BoDocument>> + Send + '_;

  /// All documents, in insertion order.
  fn list_bo_documents(
    &self,
  ) -> impl Future<Output = Result<Vec<BoDocument>>> + Send + '_;

  /// The `limit` most recent documents by publish date, newest first.
  /// Documents sharing a publish date keep their insertion order.
  fn latest_bo_documents(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<BoDocument>>> + Send + '_;

  fn get_bo_document(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<BoDocument>>> + Send + '_;

  // ── Alerts ────────────────────────────────────────────────────────────

  /// Create an unread alert. Fails if the user or document is missing.
  fn create_alert(
    &self,
    input: NewAlert,
  ) -> impl Future<Output = Result<Alert>> + Send + '_;

  /// All alerts for a user, each joined with its document.
  fn alerts_by_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<AlertWithDocument>>> + Send + '_;

  /// One-way unread → read transition. Silent no-op on an unknown id.
  fn mark_alert_read(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// Bookmark a document. Fails if the user or document is missing.
  fn create_favorite(
    &self,
    input: NewFavorite,
  ) -> impl Future<Output = Result<Favorite>> + Send + '_;

  fn favorites_by_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Favorite>>> + Send + '_;

  /// Hard delete. Idempotent — an unknown id succeeds silently.
  fn delete_favorite(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Entreprise boxes ──────────────────────────────────────────────────

  /// Create a managed company under a bureau user. Fails if the user is
  /// missing or does not carry the bureau role.
  fn create_entreprise_box(
    &self,
    input: NewEntrepriseBox,
  ) -> impl Future<Output = Result<EntrepriseBox>> + Send + '_;

  fn get_entreprise_box(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<EntrepriseBox>>> + Send + '_;

  /// Every box owned by the bureau user, each with all of its alerts
  /// (and their documents) materialised.
  fn boxes_by_bureau(
    &self,
    bureau_user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<BoxWithAlerts>>> + Send + '_;

  /// Shallow-merge `patch` over the stored box. Fails with
  /// [`Error::BoxNotFound`](crate::Error::BoxNotFound) on an unknown id.
  fn update_entreprise_box(
    &self,
    id: Uuid,
    patch: EntrepriseBoxPatch,
  ) -> impl Future<Output = Result<EntrepriseBox>> + Send + '_;

  // ── Box alerts ────────────────────────────────────────────────────────

  /// Create an unresolved alert on a box. Fails if the box or document is
  /// missing.
  fn create_box_alert(
    &self,
    input: NewBoxAlert,
  ) -> impl Future<Output = Result<BoxAlert>> + Send + '_;

  /// All alerts for one box, each joined with its document.
  fn box_alerts_by_box(
    &self,
    box_id: Uuid,
  ) -> impl Future<Output = Result<Vec<BoxAlertWithDocument>>> + Send + '_;

  /// One-way unresolved → resolved transition. Silent no-op on an unknown
  /// id.
  fn mark_box_alert_resolved(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}
