//! Contract tests for `SqliteStore` against an in-memory database.
//!
//! Where behaviour is shared with the memory backend, the assertions here
//! mirror the suite in `confo-store-memory` — both implementations must
//! answer identically.

use chrono::{TimeZone, Utc};
use confo_core::{
  Error as CoreError,
  alert::{NewAlert, NewFavorite},
  boxes::{BoxStatus, EntrepriseBoxPatch, NewBoxAlert, NewEntrepriseBox},
  document::{BoDocument, NewBoDocument, Priority},
  profile::NewBureauProfile,
  store::ComplianceStore,
  user::{NewUser, User, UserRole},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

async fn user(s: &SqliteStore, email: &str, role: UserRole) -> User {
  s.create_user(NewUser {
    email:        email.into(),
    display_name: "Test User".into(),
    role,
    firebase_uid: None,
  })
  .await
  .unwrap()
}

async fn document(s: &SqliteStore, reference: &str, day: u32) -> BoDocument {
  s.create_bo_document(NewBoDocument {
    title:        "Titre".into(),
    title_ar:     None,
    reference:    reference.into(),
    publish_date: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
    category:     "regulatory".into(),
    sector:       None,
    content_fr:   "Contenu.".into(),
    content_ar:   None,
    summary_fr:   None,
    summary_ar:   None,
    priority:     Priority::Medium,
    pdf_url:      None,
  })
  .await
  .unwrap()
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_user() {
  let s = store().await;

  let created = s
    .create_user(NewUser {
      email:        "alice@example.com".into(),
      display_name: "Alice".into(),
      role:         UserRole::Particulier,
      firebase_uid: Some("fb-123".into()),
    })
    .await
    .unwrap();

  let fetched = s.get_user(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.email, "alice@example.com");
  assert_eq!(fetched.role, UserRole::Particulier);
  assert_eq!(fetched.firebase_uid.as_deref(), Some("fb-123"));
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn firebase_uid_lookup_and_uniqueness() {
  let s = store().await;
  assert!(s.get_user_by_firebase_uid("fb-9").await.unwrap().is_none());

  s.create_user(NewUser {
    email:        "a@example.com".into(),
    display_name: "A".into(),
    role:         UserRole::Entreprise,
    firebase_uid: Some("fb-9".into()),
  })
  .await
  .unwrap();

  let found = s.get_user_by_firebase_uid("fb-9").await.unwrap().unwrap();
  assert_eq!(found.email, "a@example.com");

  let err = s
    .create_user(NewUser {
      email:        "b@example.com".into(),
      display_name: "B".into(),
      role:         UserRole::Entreprise,
      firebase_uid: Some("fb-9".into()),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::FirebaseUidInUse(_)));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
  let s = store().await;
  user(&s, "dup@example.com", UserRole::Particulier).await;

  let err = s
    .create_user(NewUser {
      email:        "dup@example.com".into(),
      display_name: "Dup".into(),
      role:         UserRole::Bureau,
      firebase_uid: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmailInUse(_)));
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn one_bureau_profile_per_user() {
  let s = store().await;
  let owner = user(&s, "bureau@example.com", UserRole::Bureau).await;

  let input = NewBureauProfile {
    user_id:           owner.id,
    organization_name: "Cabinet Benani".into(),
    legal_identity:    None,
  };
  s.create_bureau_profile(input.clone()).await.unwrap();

  let fetched = s.get_bureau_profile(owner.id).await.unwrap().unwrap();
  assert_eq!(fetched.organization_name, "Cabinet Benani");

  let err = s.create_bureau_profile(input).await.unwrap_err();
  assert!(matches!(err, CoreError::ProfileExists(_)));
}

// ─── BO documents ────────────────────────────────────────────────────────────

#[tokio::test]
async fn latest_documents_order_and_limit() {
  let s = store().await;
  document(&s, "BO-2025-003", 10).await;
  document(&s, "BO-2025-001", 15).await;
  document(&s, "BO-2025-002", 12).await;

  let latest = s.latest_bo_documents(2).await.unwrap();
  let references: Vec<&str> =
    latest.iter().map(|d| d.reference.as_str()).collect();
  assert_eq!(references, ["BO-2025-001", "BO-2025-002"]);
}

#[tokio::test]
async fn latest_ties_keep_insertion_order() {
  let s = store().await;
  document(&s, "BO-A", 10).await;
  document(&s, "BO-B", 10).await;
  document(&s, "BO-C", 10).await;

  let latest = s.latest_bo_documents(10).await.unwrap();
  let references: Vec<&str> =
    latest.iter().map(|d| d.reference.as_str()).collect();
  assert_eq!(references, ["BO-A", "BO-B", "BO-C"]);
}

#[tokio::test]
async fn duplicate_reference_conflicts() {
  let s = store().await;
  document(&s, "BO-1", 10).await;
  let err = s
    .create_bo_document(NewBoDocument {
      title:        "Autre".into(),
      title_ar:     None,
      reference:    "BO-1".into(),
      publish_date: Utc::now(),
      category:     "legal".into(),
      sector:       None,
      content_fr:   "Contenu.".into(),
      content_ar:   None,
      summary_fr:   None,
      summary_ar:   None,
      priority:     Priority::Low,
      pdf_url:      None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::ReferenceInUse(_)));
}

// ─── Alerts & favorites ──────────────────────────────────────────────────────

#[tokio::test]
async fn alert_round_trip_with_joined_document() {
  let s = store().await;
  let reader = user(&s, "reader@example.com", UserRole::Entreprise).await;
  let doc = document(&s, "BO-7", 15).await;

  s.create_alert(NewAlert { user_id: reader.id, bo_document_id: doc.id })
    .await
    .unwrap();

  let alerts = s.alerts_by_user(reader.id).await.unwrap();
  assert_eq!(alerts.len(), 1);
  assert!(!alerts[0].alert.is_read);
  assert_eq!(alerts[0].document.reference, "BO-7");
}

#[tokio::test]
async fn alert_requires_existing_document() {
  let s = store().await;
  let reader = user(&s, "reader@example.com", UserRole::Particulier).await;

  let err = s
    .create_alert(NewAlert {
      user_id:        reader.id,
      bo_document_id: Uuid::new_v4(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::DocumentNotFound(_)));
}

#[tokio::test]
async fn mark_alert_read_tolerates_unknown_ids() {
  let s = store().await;
  let reader = user(&s, "reader@example.com", UserRole::Particulier).await;
  let doc = document(&s, "BO-8", 12).await;
  let alert = s
    .create_alert(NewAlert { user_id: reader.id, bo_document_id: doc.id })
    .await
    .unwrap();

  s.mark_alert_read(alert.id).await.unwrap();
  s.mark_alert_read(alert.id).await.unwrap();
  s.mark_alert_read(Uuid::new_v4()).await.unwrap();

  let alerts = s.alerts_by_user(reader.id).await.unwrap();
  assert!(alerts[0].alert.is_read);
}

#[tokio::test]
async fn delete_favorite_is_idempotent() {
  let s = store().await;
  let reader = user(&s, "fan@example.com", UserRole::Particulier).await;
  let doc = document(&s, "BO-9", 11).await;

  let favorite = s
    .create_favorite(NewFavorite { user_id: reader.id, bo_document_id: doc.id })
    .await
    .unwrap();

  s.delete_favorite(Uuid::new_v4()).await.unwrap();
  assert_eq!(s.favorites_by_user(reader.id).await.unwrap().len(), 1);

  s.delete_favorite(favorite.id).await.unwrap();
  s.delete_favorite(favorite.id).await.unwrap();
  assert!(s.favorites_by_user(reader.id).await.unwrap().is_empty());
}

// ─── Boxes ───────────────────────────────────────────────────────────────────

fn new_box(bureau_user_id: Uuid) -> NewEntrepriseBox {
  NewEntrepriseBox {
    bureau_user_id,
    company_name: "Atlas Plastiques".into(),
    sector: "industrie".into(),
    registration_number: Some("RC-44821".into()),
    activity_type: None,
    location: Some("Casablanca".into()),
    status: BoxStatus::Active,
  }
}

#[tokio::test]
async fn box_patch_preserves_untouched_fields() {
  let s = store().await;
  let bureau = user(&s, "bureau@example.com", UserRole::Bureau).await;
  let created = s.create_entreprise_box(new_box(bureau.id)).await.unwrap();

  let updated = s
    .update_entreprise_box(created.id, EntrepriseBoxPatch {
      status: Some(BoxStatus::Inactive),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.status, BoxStatus::Inactive);
  assert_eq!(updated.company_name, created.company_name);
  assert_eq!(updated.registration_number, created.registration_number);
  assert_eq!(updated.location, created.location);
}

#[tokio::test]
async fn patch_unknown_box_is_not_found() {
  let s = store().await;
  let err = s
    .update_entreprise_box(Uuid::new_v4(), EntrepriseBoxPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::BoxNotFound(_)));
}

#[tokio::test]
async fn box_creation_requires_bureau_role() {
  let s = store().await;
  let company = user(&s, "co@example.com", UserRole::Entreprise).await;

  let err = s.create_entreprise_box(new_box(company.id)).await.unwrap_err();
  assert!(matches!(
    err,
    CoreError::WrongRole { expected: UserRole::Bureau, .. }
  ));
}

#[tokio::test]
async fn bureau_scenario_box_with_one_unresolved_alert() {
  let s = store().await;
  let bureau = user(&s, "bureau@example.com", UserRole::Bureau).await;
  let bo = s.create_entreprise_box(new_box(bureau.id)).await.unwrap();
  let doc = document(&s, "BO-2025-001", 15).await;

  s.create_box_alert(NewBoxAlert { box_id: bo.id, bo_document_id: doc.id })
    .await
    .unwrap();

  let boxes = s.boxes_by_bureau(bureau.id).await.unwrap();
  assert_eq!(boxes.len(), 1);
  assert_eq!(boxes[0].alerts.len(), 1);
  assert!(!boxes[0].alerts[0].alert.is_resolved);
  assert_eq!(boxes[0].alerts[0].document.reference, "BO-2025-001");
}

#[tokio::test]
async fn box_without_alerts_has_empty_alerts_vec() {
  let s = store().await;
  let bureau = user(&s, "bureau@example.com", UserRole::Bureau).await;
  s.create_entreprise_box(new_box(bureau.id)).await.unwrap();

  let boxes = s.boxes_by_bureau(bureau.id).await.unwrap();
  assert_eq!(boxes.len(), 1);
  assert!(boxes[0].alerts.is_empty());
}
