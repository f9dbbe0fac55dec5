//! [`MemoryStore`] — the in-memory implementation of [`ComplianceStore`].

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use confo_core::{
  Error, Result,
  alert::{Alert, AlertWithDocument, Favorite, NewAlert, NewFavorite},
  boxes::{
    BoxAlert, BoxAlertWithDocument, BoxWithAlerts, EntrepriseBox,
    EntrepriseBoxPatch, NewBoxAlert, NewEntrepriseBox,
  },
  document::{BoDocument, NewBoDocument},
  profile::{
    BureauProfile, EntrepriseProfile, NewBureauProfile, NewEntrepriseProfile,
  },
  store::ComplianceStore,
  user::{NewUser, User, UserRole},
};

use crate::seed;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A compliance store held entirely in process memory.
///
/// An explicit object, built by a constructor and injected where needed —
/// never a module-level singleton. Cloning is cheap; clones share the same
/// underlying collections.
///
/// All lookups are linear scans with equality predicates. Fine at reference
/// scale; a persistent backend indexes its foreign keys instead.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
  users:               Vec<User>,
  entreprise_profiles: Vec<EntrepriseProfile>,
  bureau_profiles:     Vec<BureauProfile>,
  documents:           Vec<BoDocument>,
  alerts:              Vec<Alert>,
  favorites:           Vec<Favorite>,
  boxes:               Vec<EntrepriseBox>,
  box_alerts:          Vec<BoxAlert>,
}

impl MemoryStore {
  /// An empty store.
  pub fn new() -> Self {
    Self::default()
  }

  /// A store preloaded with the five sample bulletins from [`crate::seed`],
  /// in seed order. Nothing else is seeded.
  pub fn seeded() -> Self {
    let store = Self::new();
    {
      let mut inner = store.inner.write();
      for input in seed::sample_documents() {
        inner.insert_document(input);
      }
    }
    store
  }
}

// ─── Internal helpers ────────────────────────────────────────────────────────

impl Inner {
  /// Verify the user exists and carries `role`.
  fn require_role(&self, user_id: Uuid, role: UserRole) -> Result<()> {
    let user = self
      .users
      .iter()
      .find(|u| u.id == user_id)
      .ok_or(Error::UserNotFound(user_id))?;
    if user.role == role {
      Ok(())
    } else {
      Err(Error::WrongRole { user_id, expected: role })
    }
  }

  fn require_user(&self, user_id: Uuid) -> Result<()> {
    if self.users.iter().any(|u| u.id == user_id) {
      Ok(())
    } else {
      Err(Error::UserNotFound(user_id))
    }
  }

  fn require_document(&self, id: Uuid) -> Result<()> {
    if self.documents.iter().any(|d| d.id == id) {
      Ok(())
    } else {
      Err(Error::DocumentNotFound(id))
    }
  }

  fn document(&self, id: Uuid) -> Result<BoDocument> {
    self
      .documents
      .iter()
      .find(|d| d.id == id)
      .cloned()
      .ok_or(Error::DocumentNotFound(id))
  }

  fn insert_document(&mut self, input: NewBoDocument) -> BoDocument {
    let document = BoDocument {
      id:           Uuid::new_v4(),
      title:        input.title,
      title_ar:     input.title_ar,
      reference:    input.reference,
      publish_date: input.publish_date,
      category:     input.category,
      sector:       input.sector,
      content_fr:   input.content_fr,
      content_ar:   input.content_ar,
      summary_fr:   input.summary_fr,
      summary_ar:   input.summary_ar,
      priority:     input.priority,
      pdf_url:      input.pdf_url,
    };
    self.documents.push(document.clone());
    document
  }

  /// Join one box with all of its alerts and their documents.
  fn box_with_alerts(&self, bo: &EntrepriseBox) -> Result<BoxWithAlerts> {
    let alerts = self
      .box_alerts
      .iter()
      .filter(|a| a.box_id == bo.id)
      .map(|a| {
        Ok(BoxAlertWithDocument {
          alert:    a.clone(),
          document: self.document(a.bo_document_id)?,
        })
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(BoxWithAlerts { entreprise_box: bo.clone(), alerts })
  }
}

// ─── ComplianceStore impl ────────────────────────────────────────────────────

impl ComplianceStore for MemoryStore {
  // ── Users ─────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let mut inner = self.inner.write();

    if inner.users.iter().any(|u| u.email == input.email) {
      return Err(Error::EmailInUse(input.email));
    }
    if let Some(uid) = &input.firebase_uid
      && inner.users.iter().any(|u| u.firebase_uid.as_ref() == Some(uid))
    {
      return Err(Error::FirebaseUidInUse(uid.clone()));
    }

    let user = User {
      id:           Uuid::new_v4(),
      email:        input.email,
      display_name: input.display_name,
      role:         input.role,
      firebase_uid: input.firebase_uid,
      created_at:   Utc::now(),
    };
    inner.users.push(user.clone());
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let inner = self.inner.read();
    Ok(inner.users.iter().find(|u| u.id == id).cloned())
  }

  async fn get_user_by_firebase_uid(&self, uid: &str) -> Result<Option<User>> {
    let inner = self.inner.read();
    Ok(
      inner
        .users
        .iter()
        .find(|u| u.firebase_uid.as_deref() == Some(uid))
        .cloned(),
    )
  }

  // ── Profiles ──────────────────────────────────────────────────────────

  async fn create_entreprise_profile(
    &self,
    input: NewEntrepriseProfile,
  ) -> Result<EntrepriseProfile> {
    let mut inner = self.inner.write();

    inner.require_role(input.user_id, UserRole::Entreprise)?;
    if inner
      .entreprise_profiles
      .iter()
      .any(|p| p.user_id == input.user_id)
    {
      return Err(Error::ProfileExists(input.user_id));
    }

    let profile = EntrepriseProfile {
      id:                  Uuid::new_v4(),
      user_id:             input.user_id,
      company_name:        input.company_name,
      sector:              input.sector,
      registration_number: input.registration_number,
      activity_type:       input.activity_type,
      location:            input.location,
      contact_person:      input.contact_person,
    };
    inner.entreprise_profiles.push(profile.clone());
    Ok(profile)
  }

  async fn get_entreprise_profile(
    &self,
    user_id: Uuid,
  ) -> Result<Option<EntrepriseProfile>> {
    let inner = self.inner.read();
    Ok(
      inner
        .entreprise_profiles
        .iter()
        .find(|p| p.user_id == user_id)
        .cloned(),
    )
  }

  async fn create_bureau_profile(
    &self,
    input: NewBureauProfile,
  ) -> Result<BureauProfile> {
    let mut inner = self.inner.write();

    inner.require_role(input.user_id, UserRole::Bureau)?;
    if inner.bureau_profiles.iter().any(|p| p.user_id == input.user_id) {
      return Err(Error::ProfileExists(input.user_id));
    }

    let profile = BureauProfile {
      id:                Uuid::new_v4(),
      user_id:           input.user_id,
      organization_name: input.organization_name,
      legal_identity:    input.legal_identity,
    };
    inner.bureau_profiles.push(profile.clone());
    Ok(profile)
  }

  async fn get_bureau_profile(
    &self,
    user_id: Uuid,
  ) -> Result<Option<BureauProfile>> {
    let inner = self.inner.read();
    Ok(
      inner
        .bureau_profiles
        .iter()
        .find(|p| p.user_id == user_id)
        .cloned(),
    )
  }

  // ── BO documents ──────────────────────────────────────────────────────

  async fn create_bo_document(
    &self,
    input: NewBoDocument,
  ) -> Result<BoDocument> {
    let mut inner = self.inner.write();
    if inner.documents.iter().any(|d| d.reference == input.reference) {
      return Err(Error::ReferenceInUse(input.reference));
    }
    Ok(inner.insert_document(input))
  }

  async fn list_bo_documents(&self) -> Result<Vec<BoDocument>> {
    let inner = self.inner.read();
    Ok(inner.documents.clone())
  }

  async fn latest_bo_documents(&self, limit: usize) -> Result<Vec<BoDocument>> {
    let inner = self.inner.read();
    let mut documents = inner.documents.clone();
    // Stable sort: documents sharing a publish date keep insertion order.
    documents.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
    documents.truncate(limit);
    Ok(documents)
  }

  async fn get_bo_document(&self, id: Uuid) -> Result<Option<BoDocument>> {
    let inner = self.inner.read();
    Ok(inner.documents.iter().find(|d| d.id == id).cloned())
  }

  // ── Alerts ────────────────────────────────────────────────────────────

  async fn create_alert(&self, input: NewAlert) -> Result<Alert> {
    let mut inner = self.inner.write();
    inner.require_user(input.user_id)?;
    inner.require_document(input.bo_document_id)?;

    let alert = Alert {
      id:             Uuid::new_v4(),
      user_id:        input.user_id,
      bo_document_id: input.bo_document_id,
      is_read:        false,
      created_at:     Utc::now(),
    };
    inner.alerts.push(alert.clone());
    Ok(alert)
  }

  async fn alerts_by_user(&self, user_id: Uuid) -> Result<Vec<AlertWithDocument>> {
    let inner = self.inner.read();
    inner
      .alerts
      .iter()
      .filter(|a| a.user_id == user_id)
      .map(|a| {
        Ok(AlertWithDocument {
          alert:    a.clone(),
          document: inner.document(a.bo_document_id)?,
        })
      })
      .collect()
  }

  async fn mark_alert_read(&self, id: Uuid) -> Result<()> {
    let mut inner = self.inner.write();
    if let Some(alert) = inner.alerts.iter_mut().find(|a| a.id == id) {
      alert.is_read = true;
    }
    Ok(())
  }

  // ── Favorites ─────────────────────────────────────────────────────────

  async fn create_favorite(&self, input: NewFavorite) -> Result<Favorite> {
    let mut inner = self.inner.write();
    inner.require_user(input.user_id)?;
    inner.require_document(input.bo_document_id)?;

    let favorite = Favorite {
      id:             Uuid::new_v4(),
      user_id:        input.user_id,
      bo_document_id: input.bo_document_id,
      created_at:     Utc::now(),
    };
    inner.favorites.push(favorite.clone());
    Ok(favorite)
  }

  async fn favorites_by_user(&self, user_id: Uuid) -> Result<Vec<Favorite>> {
    let inner = self.inner.read();
    Ok(
      inner
        .favorites
        .iter()
        .filter(|f| f.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn delete_favorite(&self, id: Uuid) -> Result<()> {
    let mut inner = self.inner.write();
    inner.favorites.retain(|f| f.id != id);
    Ok(())
  }

  // ── Entreprise boxes ──────────────────────────────────────────────────

  async fn create_entreprise_box(
    &self,
    input: NewEntrepriseBox,
  ) -> Result<EntrepriseBox> {
    let mut inner = self.inner.write();
    inner.require_role(input.bureau_user_id, UserRole::Bureau)?;

    let bo = EntrepriseBox {
      id:                  Uuid::new_v4(),
      bureau_user_id:      input.bureau_user_id,
      company_name:        input.company_name,
      sector:              input.sector,
      registration_number: input.registration_number,
      activity_type:       input.activity_type,
      location:            input.location,
      status:              input.status,
      created_at:          Utc::now(),
    };
    inner.boxes.push(bo.clone());
    Ok(bo)
  }

  async fn get_entreprise_box(&self, id: Uuid) -> Result<Option<EntrepriseBox>> {
    let inner = self.inner.read();
    Ok(inner.boxes.iter().find(|b| b.id == id).cloned())
  }

  async fn boxes_by_bureau(
    &self,
    bureau_user_id: Uuid,
  ) -> Result<Vec<BoxWithAlerts>> {
    let inner = self.inner.read();
    inner
      .boxes
      .iter()
      .filter(|b| b.bureau_user_id == bureau_user_id)
      .map(|b| inner.box_with_alerts(b))
      .collect()
  }

  async fn update_entreprise_box(
    &self,
    id: Uuid,
    patch: EntrepriseBoxPatch,
  ) -> Result<EntrepriseBox> {
    let mut inner = self.inner.write();
    let bo = inner
      .boxes
      .iter_mut()
      .find(|b| b.id == id)
      .ok_or(Error::BoxNotFound(id))?;
    patch.apply(bo);
    Ok(bo.clone())
  }

  // ── Box alerts ────────────────────────────────────────────────────────

  async fn create_box_alert(&self, input: NewBoxAlert) -> Result<BoxAlert> {
    let mut inner = self.inner.write();
    if !inner.boxes.iter().any(|b| b.id == input.box_id) {
      return Err(Error::BoxNotFound(input.box_id));
    }
    inner.require_document(input.bo_document_id)?;

    let alert = BoxAlert {
      id:             Uuid::new_v4(),
      box_id:         input.box_id,
      bo_document_id: input.bo_document_id,
      is_resolved:    false,
      created_at:     Utc::now(),
    };
    inner.box_alerts.push(alert.clone());
    Ok(alert)
  }

  async fn box_alerts_by_box(
    &self,
    box_id: Uuid,
  ) -> Result<Vec<BoxAlertWithDocument>> {
    let inner = self.inner.read();
    inner
      .box_alerts
      .iter()
      .filter(|a| a.box_id == box_id)
      .map(|a| {
        Ok(BoxAlertWithDocument {
          alert:    a.clone(),
          document: inner.document(a.bo_document_id)?,
        })
      })
      .collect()
  }

  async fn mark_box_alert_resolved(&self, id: Uuid) -> Result<()> {
    let mut inner = self.inner.write();
    if let Some(alert) = inner.box_alerts.iter_mut().find(|a| a.id == id) {
      alert.is_resolved = true;
    }
    Ok(())
  }
}
