//! Integration tests driving the full router over an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use confo_store_memory::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::api_router;

fn app() -> Router {
  api_router(Arc::new(MemoryStore::new()))
}

fn seeded_app() -> Router {
  api_router(Arc::new(MemoryStore::seeded()))
}

async fn send(
  app: Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn create_user(app: &Router, email: &str, role: &str) -> Value {
  let (status, body) = send(
    app.clone(),
    "POST",
    "/users",
    Some(json!({
      "email":       email,
      "displayName": "Test User",
      "role":        role,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "create user: {body}");
  body
}

async fn create_document(app: &Router, reference: &str) -> Value {
  let (status, body) = send(
    app.clone(),
    "POST",
    "/bo-documents",
    Some(json!({
      "title":       format!("Bulletin {reference}"),
      "reference":   reference,
      "publishDate": "2025-02-01T00:00:00Z",
      "category":    "regulatory",
      "contentFr":   "Texte intégral.",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "create document: {body}");
  body
}

async fn create_box(app: &Router, bureau_user_id: &str) -> Value {
  let (status, body) = send(
    app.clone(),
    "POST",
    "/entreprise-boxes",
    Some(json!({
      "bureauUserId": bureau_user_id,
      "companyName":  "Atlas Textile",
      "sector":       "textile",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "create box: {body}");
  body
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_fetch_user() {
  let app = app();
  let created =
    create_user(&app, "amina@example.com", "particulier").await;
  assert_eq!(created["email"], "amina@example.com");
  assert_eq!(created["role"], "particulier");

  let id = created["id"].as_str().unwrap();
  let (status, fetched) =
    send(app, "GET", &format!("/users/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn unknown_user_is_404() {
  let (status, body) = send(
    app(),
    "GET",
    "/users/00000000-0000-0000-0000-000000000000",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn user_body_missing_field_is_400() {
  let (status, body) = send(
    app(),
    "POST",
    "/users",
    Some(json!({ "email": "a@example.com", "role": "particulier" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn user_body_unknown_field_is_400() {
  let (status, _) = send(
    app(),
    "POST",
    "/users",
    Some(json!({
      "email":       "a@example.com",
      "displayName": "A",
      "role":        "particulier",
      "isAdmin":     true,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_is_400() {
  let (status, body) = send(
    app(),
    "POST",
    "/users",
    Some(json!({
      "email":       "not-an-address",
      "displayName": "A",
      "role":        "particulier",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("email"), "{body}");
}

#[tokio::test]
async fn duplicate_email_is_409() {
  let app = app();
  create_user(&app, "dup@example.com", "particulier").await;
  let (status, _) = send(
    app,
    "POST",
    "/users",
    Some(json!({
      "email":       "dup@example.com",
      "displayName": "Other",
      "role":        "bureau",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn lookup_by_firebase_uid() {
  let app = app();
  let (status, created) = send(
    app.clone(),
    "POST",
    "/users",
    Some(json!({
      "email":       "linked@example.com",
      "displayName": "Linked",
      "role":        "entreprise",
      "firebaseUid": "fb-123",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, fetched) =
    send(app.clone(), "GET", "/users/by-firebase-uid/fb-123", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, created);

  let (status, _) =
    send(app, "GET", "/users/by-firebase-uid/fb-999", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Profiles ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn entreprise_profile_lifecycle() {
  let app = app();
  let user = create_user(&app, "corp@example.com", "entreprise").await;
  let user_id = user["id"].as_str().unwrap();

  let (status, profile) = send(
    app.clone(),
    "POST",
    "/entreprise-profiles",
    Some(json!({
      "userId":      user_id,
      "companyName": "Maroc Agro",
      "sector":      "agroalimentaire",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{profile}");
  assert_eq!(profile["companyName"], "Maroc Agro");

  let (status, fetched) = send(
    app.clone(),
    "GET",
    &format!("/entreprise-profiles/by-user/{user_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, profile);

  // Second profile for the same user is a conflict.
  let (status, _) = send(
    app,
    "POST",
    "/entreprise-profiles",
    Some(json!({
      "userId":      user_id,
      "companyName": "Maroc Agro 2",
      "sector":      "agroalimentaire",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn entreprise_profile_for_bureau_user_is_400() {
  let app = app();
  let user = create_user(&app, "bureau@example.com", "bureau").await;
  let (status, body) = send(
    app,
    "POST",
    "/entreprise-profiles",
    Some(json!({
      "userId":      user["id"],
      "companyName": "Nope",
      "sector":      "textile",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn bureau_profile_absent_is_404() {
  let app = app();
  let user = create_user(&app, "fresh@example.com", "bureau").await;
  let user_id = user["id"].as_str().unwrap();
  let (status, _) = send(
    app,
    "GET",
    &format!("/bureau-profiles/by-user/{user_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── BO documents ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeded_feed_lists_five_documents() {
  let (status, body) = send(seeded_app(), "GET", "/bo-documents", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn latest_respects_limit_and_order() {
  let (status, body) =
    send(seeded_app(), "GET", "/bo-documents/latest?limit=3", None).await;
  assert_eq!(status, StatusCode::OK);
  let refs: Vec<&str> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|d| d["reference"].as_str().unwrap())
    .collect();
  assert_eq!(refs, ["BO-2025-001", "BO-2025-002", "BO-2025-003"]);
}

#[tokio::test]
async fn latest_defaults_to_ten() {
  let (status, body) =
    send(seeded_app(), "GET", "/bo-documents/latest", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn duplicate_reference_is_409() {
  let app = app();
  create_document(&app, "BO-2026-100").await;
  let (status, _) = send(
    app,
    "POST",
    "/bo-documents",
    Some(json!({
      "title":       "Autre bulletin",
      "reference":   "BO-2026-100",
      "publishDate": "2025-03-01T00:00:00Z",
      "category":    "legal",
      "contentFr":   "Texte.",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn document_defaults_priority_to_medium() {
  let app = app();
  let doc = create_document(&app, "BO-2026-200").await;
  assert_eq!(doc["priority"], "medium");
}

// ── Alerts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn alert_lifecycle() {
  let app = app();
  let user = create_user(&app, "reader@example.com", "entreprise").await;
  let doc = create_document(&app, "BO-2026-300").await;
  let user_id = user["id"].as_str().unwrap();

  let (status, alert) = send(
    app.clone(),
    "POST",
    "/alerts",
    Some(json!({ "userId": user_id, "boDocumentId": doc["id"] })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{alert}");
  assert_eq!(alert["isRead"], false);

  // The listing joins the document in, flattened alongside alert fields.
  let (status, listed) = send(
    app.clone(),
    "GET",
    &format!("/alerts/by-user/{user_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let listed = &listed.as_array().unwrap()[0];
  assert_eq!(listed["id"], alert["id"]);
  assert_eq!(listed["document"]["reference"], "BO-2026-300");

  let alert_id = alert["id"].as_str().unwrap();
  let (status, body) = send(
    app.clone(),
    "PATCH",
    &format!("/alerts/{alert_id}/read"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);

  let (_, listed) = send(
    app,
    "GET",
    &format!("/alerts/by-user/{user_id}"),
    None,
  )
  .await;
  assert_eq!(listed.as_array().unwrap()[0]["isRead"], true);
}

#[tokio::test]
async fn alert_for_missing_document_is_404() {
  let app = app();
  let user = create_user(&app, "noone@example.com", "particulier").await;
  let (status, _) = send(
    app,
    "POST",
    "/alerts",
    Some(json!({
      "userId":       user["id"],
      "boDocumentId": "00000000-0000-0000-0000-000000000000",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mark_read_tolerates_unknown_id() {
  let (status, body) = send(
    app(),
    "PATCH",
    "/alerts/00000000-0000-0000-0000-000000000000/read",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn favorite_lifecycle() {
  let app = app();
  let user = create_user(&app, "fan@example.com", "particulier").await;
  let doc = create_document(&app, "BO-2026-400").await;
  let user_id = user["id"].as_str().unwrap();

  let (status, favorite) = send(
    app.clone(),
    "POST",
    "/favorites",
    Some(json!({ "userId": user_id, "boDocumentId": doc["id"] })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{favorite}");

  let (_, listed) = send(
    app.clone(),
    "GET",
    &format!("/favorites/by-user/{user_id}"),
    None,
  )
  .await;
  assert_eq!(listed.as_array().unwrap().len(), 1);

  let favorite_id = favorite["id"].as_str().unwrap();
  let (status, body) = send(
    app.clone(),
    "DELETE",
    &format!("/favorites/{favorite_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);

  // Deleting again still succeeds.
  let (status, _) = send(
    app.clone(),
    "DELETE",
    &format!("/favorites/{favorite_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, listed) = send(
    app,
    "GET",
    &format!("/favorites/by-user/{user_id}"),
    None,
  )
  .await;
  assert!(listed.as_array().unwrap().is_empty());
}

// ── Entreprise boxes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn box_requires_bureau_owner() {
  let app = app();
  let user = create_user(&app, "indiv@example.com", "particulier").await;
  let (status, body) = send(
    app,
    "POST",
    "/entreprise-boxes",
    Some(json!({
      "bureauUserId": user["id"],
      "companyName":  "Atlas Textile",
      "sector":       "textile",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn box_lifecycle_with_patch() {
  let app = app();
  let bureau = create_user(&app, "cab@example.com", "bureau").await;
  let bureau_id = bureau["id"].as_str().unwrap();
  let created = create_box(&app, bureau_id).await;
  assert_eq!(created["status"], "active");

  let box_id = created["id"].as_str().unwrap();
  let (status, patched) = send(
    app.clone(),
    "PATCH",
    &format!("/entreprise-boxes/{box_id}"),
    Some(json!({ "sector": "agro", "status": "inactive" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "{patched}");
  assert_eq!(patched["sector"], "agro");
  assert_eq!(patched["status"], "inactive");
  // Untouched fields survive the merge.
  assert_eq!(patched["companyName"], "Atlas Textile");

  let (status, fetched) = send(
    app,
    "GET",
    &format!("/entreprise-boxes/{box_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, patched);
}

#[tokio::test]
async fn patch_unknown_box_is_404() {
  let (status, _) = send(
    app(),
    "PATCH",
    "/entreprise-boxes/00000000-0000-0000-0000-000000000000",
    Some(json!({ "sector": "agro" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_with_blank_company_name_is_400() {
  let app = app();
  let bureau = create_user(&app, "cab2@example.com", "bureau").await;
  let created = create_box(&app, bureau["id"].as_str().unwrap()).await;
  let box_id = created["id"].as_str().unwrap();
  let (status, _) = send(
    app,
    "PATCH",
    &format!("/entreprise-boxes/{box_id}"),
    Some(json!({ "companyName": "" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bureau_dashboard_materialises_box_alerts() {
  let app = app();
  let bureau = create_user(&app, "cab3@example.com", "bureau").await;
  let bureau_id = bureau["id"].as_str().unwrap();
  let created = create_box(&app, bureau_id).await;
  let doc = create_document(&app, "BO-2026-500").await;

  let (status, alert) = send(
    app.clone(),
    "POST",
    "/box-alerts",
    Some(json!({ "boxId": created["id"], "boDocumentId": doc["id"] })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{alert}");
  assert_eq!(alert["isResolved"], false);

  let (status, boxes) = send(
    app.clone(),
    "GET",
    &format!("/entreprise-boxes/by-bureau/{bureau_id}"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let boxes = boxes.as_array().unwrap();
  assert_eq!(boxes.len(), 1);
  let alerts = boxes[0]["alerts"].as_array().unwrap();
  assert_eq!(alerts.len(), 1);
  assert_eq!(alerts[0]["document"]["reference"], "BO-2026-500");

  let alert_id = alert["id"].as_str().unwrap();
  let (status, body) = send(
    app.clone(),
    "PATCH",
    &format!("/box-alerts/{alert_id}/resolve"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);

  let box_id = created["id"].as_str().unwrap();
  let (_, listed) = send(
    app,
    "GET",
    &format!("/box-alerts/by-box/{box_id}"),
    None,
  )
  .await;
  assert_eq!(listed.as_array().unwrap()[0]["isResolved"], true);
}

#[tokio::test]
async fn box_alert_for_unknown_box_is_404() {
  let app = app();
  let doc = create_document(&app, "BO-2026-600").await;
  let (status, _) = send(
    app,
    "POST",
    "/box-alerts",
    Some(json!({
      "boxId":        "00000000-0000-0000-0000-000000000000",
      "boDocumentId": doc["id"],
    })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
