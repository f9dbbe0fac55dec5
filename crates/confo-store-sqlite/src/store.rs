//! [`SqliteStore`] — the SQLite implementation of [`ComplianceStore`].
//!
//! Each trait method runs its reads and writes inside a single
//! [`tokio_rusqlite`] closure; the connection's worker thread executes
//! closures one at a time, which is what makes every operation atomic.
//! Domain outcomes (conflicts, not-found) are produced inside the closure as
//! values, so they travel out through the `Ok` channel and never get mixed
//! up with real database faults.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use confo_core::{
  Error as CoreError, Result as CoreResult,
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

use crate::{
  Error, Result,
  encode::{
    DOCUMENT_SELECT, RawAlert, RawBox, RawBoxAlert, RawBureauProfile,
    RawDocument, RawEntrepriseProfile, RawFavorite, RawUser, encode_dt,
    encode_priority, encode_role, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

/// Document column list qualified with the `d.` join alias.
const DOCUMENT_SELECT_D: &str = "d.id, d.title, d.title_ar, d.reference, \
   d.publish_date, d.category, d.sector, d.content_fr, d.content_ar, \
   d.summary_fr, d.summary_ar, d.priority, d.pdf_url";

// ─── Closure-level helpers ───────────────────────────────────────────────────

fn exists(
  conn: &rusqlite::Connection,
  sql: &str,
  key: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(sql, rusqlite::params![key], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

/// Verify the user exists and carries `expected`, reporting domain failures
/// as values.
fn check_role(
  conn: &rusqlite::Connection,
  user_id: Uuid,
  expected: UserRole,
) -> rusqlite::Result<std::result::Result<(), CoreError>> {
  let role: Option<String> = conn
    .query_row(
      "SELECT role FROM users WHERE id = ?1",
      rusqlite::params![encode_uuid(user_id)],
      |r| r.get(0),
    )
    .optional()?;

  Ok(match role {
    None => Err(CoreError::UserNotFound(user_id)),
    Some(r) if r != encode_role(expected) => {
      Err(CoreError::WrongRole { user_id, expected })
    }
    Some(_) => Ok(()),
  })
}

fn check_document(
  conn: &rusqlite::Connection,
  id: Uuid,
) -> rusqlite::Result<std::result::Result<(), CoreError>> {
  Ok(
    if exists(conn, "SELECT 1 FROM bo_documents WHERE id = ?1", &encode_uuid(id))? {
      Ok(())
    } else {
      Err(CoreError::DocumentNotFound(id))
    },
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A compliance store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ComplianceStore impl ────────────────────────────────────────────────────

impl ComplianceStore for SqliteStore {
  // ── Users ─────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> CoreResult<User> {
    let user = User {
      id:           Uuid::new_v4(),
      email:        input.email,
      display_name: input.display_name,
      role:         input.role,
      firebase_uid: input.firebase_uid,
      created_at:   Utc::now(),
    };

    self
      .conn
      .call(move |conn| {
        if exists(conn, "SELECT 1 FROM users WHERE email = ?1", &user.email)? {
          return Ok(Err(CoreError::EmailInUse(user.email.clone())));
        }
        if let Some(uid) = &user.firebase_uid
          && exists(conn, "SELECT 1 FROM users WHERE firebase_uid = ?1", uid)?
        {
          return Ok(Err(CoreError::FirebaseUidInUse(uid.clone())));
        }

        conn.execute(
          "INSERT INTO users (id, email, display_name, role, firebase_uid, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            encode_uuid(user.id),
            user.email,
            user.display_name,
            encode_role(user.role),
            user.firebase_uid,
            encode_dt(user.created_at),
          ],
        )?;
        Ok(Ok(user))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn get_user(&self, id: Uuid) -> CoreResult<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, email, display_name, role, firebase_uid, created_at
               FROM users WHERE id = ?1",
              rusqlite::params![id_str],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawUser::into_user).transpose()?)
  }

  async fn get_user_by_firebase_uid(&self, uid: &str) -> CoreResult<Option<User>> {
    let uid = uid.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, email, display_name, role, firebase_uid, created_at
               FROM users WHERE firebase_uid = ?1",
              rusqlite::params![uid],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawUser::into_user).transpose()?)
  }

  // ── Profiles ──────────────────────────────────────────────────────────

  async fn create_entreprise_profile(
    &self,
    input: NewEntrepriseProfile,
  ) -> CoreResult<EntrepriseProfile> {
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

    self
      .conn
      .call(move |conn| {
        if let Err(e) = check_role(conn, profile.user_id, UserRole::Entreprise)? {
          return Ok(Err(e));
        }
        if exists(
          conn,
          "SELECT 1 FROM entreprise_profiles WHERE user_id = ?1",
          &encode_uuid(profile.user_id),
        )? {
          return Ok(Err(CoreError::ProfileExists(profile.user_id)));
        }

        conn.execute(
          "INSERT INTO entreprise_profiles
             (id, user_id, company_name, sector, registration_number,
              activity_type, location, contact_person)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            encode_uuid(profile.id),
            encode_uuid(profile.user_id),
            profile.company_name,
            profile.sector,
            profile.registration_number,
            profile.activity_type,
            profile.location,
            profile.contact_person,
          ],
        )?;
        Ok(Ok(profile))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn get_entreprise_profile(
    &self,
    user_id: Uuid,
  ) -> CoreResult<Option<EntrepriseProfile>> {
    let user_id_str = encode_uuid(user_id);

    let raw: Option<RawEntrepriseProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, user_id, company_name, sector, registration_number,
                      activity_type, location, contact_person
               FROM entreprise_profiles WHERE user_id = ?1",
              rusqlite::params![user_id_str],
              RawEntrepriseProfile::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawEntrepriseProfile::into_profile).transpose()?)
  }

  async fn create_bureau_profile(
    &self,
    input: NewBureauProfile,
  ) -> CoreResult<BureauProfile> {
    let profile = BureauProfile {
      id:                Uuid::new_v4(),
      user_id:           input.user_id,
      organization_name: input.organization_name,
      legal_identity:    input.legal_identity,
    };

    self
      .conn
      .call(move |conn| {
        if let Err(e) = check_role(conn, profile.user_id, UserRole::Bureau)? {
          return Ok(Err(e));
        }
        if exists(
          conn,
          "SELECT 1 FROM bureau_profiles WHERE user_id = ?1",
          &encode_uuid(profile.user_id),
        )? {
          return Ok(Err(CoreError::ProfileExists(profile.user_id)));
        }

        conn.execute(
          "INSERT INTO bureau_profiles (id, user_id, organization_name, legal_identity)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            encode_uuid(profile.id),
            encode_uuid(profile.user_id),
            profile.organization_name,
            profile.legal_identity,
          ],
        )?;
        Ok(Ok(profile))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn get_bureau_profile(
    &self,
    user_id: Uuid,
  ) -> CoreResult<Option<BureauProfile>> {
    let user_id_str = encode_uuid(user_id);

    let raw: Option<RawBureauProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, user_id, organization_name, legal_identity
               FROM bureau_profiles WHERE user_id = ?1",
              rusqlite::params![user_id_str],
              RawBureauProfile::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawBureauProfile::into_profile).transpose()?)
  }

  // ── BO documents ──────────────────────────────────────────────────────

  async fn create_bo_document(
    &self,
    input: NewBoDocument,
  ) -> CoreResult<BoDocument> {
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

    self
      .conn
      .call(move |conn| {
        if exists(
          conn,
          "SELECT 1 FROM bo_documents WHERE reference = ?1",
          &document.reference,
        )? {
          return Ok(Err(CoreError::ReferenceInUse(document.reference.clone())));
        }

        conn.execute(
          "INSERT INTO bo_documents
             (id, title, title_ar, reference, publish_date, category, sector,
              content_fr, content_ar, summary_fr, summary_ar, priority, pdf_url)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            encode_uuid(document.id),
            document.title,
            document.title_ar,
            document.reference,
            encode_dt(document.publish_date),
            document.category,
            document.sector,
            document.content_fr,
            document.content_ar,
            document.summary_fr,
            document.summary_ar,
            encode_priority(document.priority),
            document.pdf_url,
          ],
        )?;
        Ok(Ok(document))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn list_bo_documents(&self) -> CoreResult<Vec<BoDocument>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DOCUMENT_SELECT} FROM bo_documents ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], |row| RawDocument::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    Ok(
      raws
        .into_iter()
        .map(RawDocument::into_document)
        .collect::<Result<Vec<_>>>()?,
    )
  }

  async fn latest_bo_documents(&self, limit: usize) -> CoreResult<Vec<BoDocument>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        // rowid ascending keeps insertion order for equal publish dates.
        let mut stmt = conn.prepare(&format!(
          "SELECT {DOCUMENT_SELECT} FROM bo_documents
           ORDER BY publish_date DESC, rowid ASC LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| {
            RawDocument::from_row(row, 0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    Ok(
      raws
        .into_iter()
        .map(RawDocument::into_document)
        .collect::<Result<Vec<_>>>()?,
    )
  }

  async fn get_bo_document(&self, id: Uuid) -> CoreResult<Option<BoDocument>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {DOCUMENT_SELECT} FROM bo_documents WHERE id = ?1"
              ),
              rusqlite::params![id_str],
              |row| RawDocument::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawDocument::into_document).transpose()?)
  }

  // ── Alerts ────────────────────────────────────────────────────────────

  async fn create_alert(&self, input: NewAlert) -> CoreResult<Alert> {
    let alert = Alert {
      id:             Uuid::new_v4(),
      user_id:        input.user_id,
      bo_document_id: input.bo_document_id,
      is_read:        false,
      created_at:     Utc::now(),
    };

    self
      .conn
      .call(move |conn| {
        if !exists(conn, "SELECT 1 FROM users WHERE id = ?1", &encode_uuid(alert.user_id))? {
          return Ok(Err(CoreError::UserNotFound(alert.user_id)));
        }
        if let Err(e) = check_document(conn, alert.bo_document_id)? {
          return Ok(Err(e));
        }

        conn.execute(
          "INSERT INTO alerts (id, user_id, bo_document_id, is_read, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            encode_uuid(alert.id),
            encode_uuid(alert.user_id),
            encode_uuid(alert.bo_document_id),
            alert.is_read,
            encode_dt(alert.created_at),
          ],
        )?;
        Ok(Ok(alert))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn alerts_by_user(
    &self,
    user_id: Uuid,
  ) -> CoreResult<Vec<AlertWithDocument>> {
    let user_id_str = encode_uuid(user_id);

    let raws: Vec<(RawAlert, RawDocument)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT a.id, a.user_id, a.bo_document_id, a.is_read, a.created_at,
                  {DOCUMENT_SELECT_D}
           FROM alerts a
           JOIN bo_documents d ON d.id = a.bo_document_id
           WHERE a.user_id = ?1 ORDER BY a.rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id_str], |row| {
            Ok((RawAlert::from_row(row)?, RawDocument::from_row(row, 5)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    raws
      .into_iter()
      .map(|(alert, document)| {
        Ok(AlertWithDocument {
          alert:    alert.into_alert()?,
          document: document.into_document()?,
        })
      })
      .collect::<Result<Vec<_>>>()
      .map_err(Into::into)
  }

  async fn mark_alert_read(&self, id: Uuid) -> CoreResult<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        // Zero rows affected means unknown id — a silent success.
        conn.execute(
          "UPDATE alerts SET is_read = 1 WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await
      .map_err(Error::Database)?;
    Ok(())
  }

  // ── Favorites ─────────────────────────────────────────────────────────

  async fn create_favorite(&self, input: NewFavorite) -> CoreResult<Favorite> {
    let favorite = Favorite {
      id:             Uuid::new_v4(),
      user_id:        input.user_id,
      bo_document_id: input.bo_document_id,
      created_at:     Utc::now(),
    };

    self
      .conn
      .call(move |conn| {
        if !exists(conn, "SELECT 1 FROM users WHERE id = ?1", &encode_uuid(favorite.user_id))? {
          return Ok(Err(CoreError::UserNotFound(favorite.user_id)));
        }
        if let Err(e) = check_document(conn, favorite.bo_document_id)? {
          return Ok(Err(e));
        }

        conn.execute(
          "INSERT INTO favorites (id, user_id, bo_document_id, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            encode_uuid(favorite.id),
            encode_uuid(favorite.user_id),
            encode_uuid(favorite.bo_document_id),
            encode_dt(favorite.created_at),
          ],
        )?;
        Ok(Ok(favorite))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn favorites_by_user(&self, user_id: Uuid) -> CoreResult<Vec<Favorite>> {
    let user_id_str = encode_uuid(user_id);

    let raws: Vec<RawFavorite> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, user_id, bo_document_id, created_at
           FROM favorites WHERE user_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id_str], RawFavorite::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    Ok(
      raws
        .into_iter()
        .map(RawFavorite::into_favorite)
        .collect::<Result<Vec<_>>>()?,
    )
  }

  async fn delete_favorite(&self, id: Uuid) -> CoreResult<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM favorites WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await
      .map_err(Error::Database)?;
    Ok(())
  }

  // ── Entreprise boxes ──────────────────────────────────────────────────

  async fn create_entreprise_box(
    &self,
    input: NewEntrepriseBox,
  ) -> CoreResult<EntrepriseBox> {
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

    self
      .conn
      .call(move |conn| {
        if let Err(e) = check_role(conn, bo.bureau_user_id, UserRole::Bureau)? {
          return Ok(Err(e));
        }

        conn.execute(
          "INSERT INTO entreprise_boxes
             (id, bureau_user_id, company_name, sector, registration_number,
              activity_type, location, status, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            encode_uuid(bo.id),
            encode_uuid(bo.bureau_user_id),
            bo.company_name,
            bo.sector,
            bo.registration_number,
            bo.activity_type,
            bo.location,
            encode_status(bo.status),
            encode_dt(bo.created_at),
          ],
        )?;
        Ok(Ok(bo))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn get_entreprise_box(
    &self,
    id: Uuid,
  ) -> CoreResult<Option<EntrepriseBox>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBox> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, bureau_user_id, company_name, sector,
                      registration_number, activity_type, location, status,
                      created_at
               FROM entreprise_boxes WHERE id = ?1",
              rusqlite::params![id_str],
              RawBox::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::Database)?;

    Ok(raw.map(RawBox::into_box).transpose()?)
  }

  async fn boxes_by_bureau(
    &self,
    bureau_user_id: Uuid,
  ) -> CoreResult<Vec<BoxWithAlerts>> {
    let bureau_str = encode_uuid(bureau_user_id);

    type RawJoined = (RawBox, Vec<(RawBoxAlert, RawDocument)>);
    let raws: Vec<RawJoined> = self
      .conn
      .call(move |conn| {
        let mut box_stmt = conn.prepare(
          "SELECT id, bureau_user_id, company_name, sector,
                  registration_number, activity_type, location, status,
                  created_at
           FROM entreprise_boxes WHERE bureau_user_id = ?1 ORDER BY rowid",
        )?;
        let boxes = box_stmt
          .query_map(rusqlite::params![bureau_str], RawBox::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut alert_stmt = conn.prepare(&format!(
          "SELECT a.id, a.box_id, a.bo_document_id, a.is_resolved,
                  a.created_at, {DOCUMENT_SELECT_D}
           FROM box_alerts a
           JOIN bo_documents d ON d.id = a.bo_document_id
           WHERE a.box_id = ?1 ORDER BY a.rowid"
        ))?;

        let mut joined = Vec::with_capacity(boxes.len());
        for raw_box in boxes {
          let alerts = alert_stmt
            .query_map(rusqlite::params![raw_box.id.clone()], |row| {
              Ok((RawBoxAlert::from_row(row)?, RawDocument::from_row(row, 5)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          joined.push((raw_box, alerts));
        }
        Ok(joined)
      })
      .await
      .map_err(Error::Database)?;

    raws
      .into_iter()
      .map(|(raw_box, raw_alerts)| {
        Ok(BoxWithAlerts {
          entreprise_box: raw_box.into_box()?,
          alerts:         raw_alerts
            .into_iter()
            .map(|(alert, document)| {
              Ok(BoxAlertWithDocument {
                alert:    alert.into_alert()?,
                document: document.into_document()?,
              })
            })
            .collect::<Result<Vec<_>>>()?,
        })
      })
      .collect::<Result<Vec<_>>>()
      .map_err(Into::into)
  }

  async fn update_entreprise_box(
    &self,
    id: Uuid,
    patch: EntrepriseBoxPatch,
  ) -> CoreResult<EntrepriseBox> {
    let id_str = encode_uuid(id);
    let status = patch.status.map(encode_status);

    let raw = self
      .conn
      .call(move |conn| {
        // COALESCE keeps the stored value wherever the patch is absent —
        // the shallow merge the contract asks for.
        let changed = conn.execute(
          "UPDATE entreprise_boxes SET
             company_name        = COALESCE(?2, company_name),
             sector              = COALESCE(?3, sector),
             registration_number = COALESCE(?4, registration_number),
             activity_type       = COALESCE(?5, activity_type),
             location            = COALESCE(?6, location),
             status              = COALESCE(?7, status)
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            patch.company_name,
            patch.sector,
            patch.registration_number,
            patch.activity_type,
            patch.location,
            status,
          ],
        )?;
        if changed == 0 {
          return Ok(Err(CoreError::BoxNotFound(id)));
        }

        let raw = conn.query_row(
          "SELECT id, bureau_user_id, company_name, sector,
                  registration_number, activity_type, location, status,
                  created_at
           FROM entreprise_boxes WHERE id = ?1",
          rusqlite::params![id_str],
          RawBox::from_row,
        )?;
        Ok(Ok(raw))
      })
      .await
      .map_err(Error::Database)??;

    Ok(raw.into_box()?)
  }

  // ── Box alerts ────────────────────────────────────────────────────────

  async fn create_box_alert(&self, input: NewBoxAlert) -> CoreResult<BoxAlert> {
    let alert = BoxAlert {
      id:             Uuid::new_v4(),
      box_id:         input.box_id,
      bo_document_id: input.bo_document_id,
      is_resolved:    false,
      created_at:     Utc::now(),
    };

    self
      .conn
      .call(move |conn| {
        if !exists(
          conn,
          "SELECT 1 FROM entreprise_boxes WHERE id = ?1",
          &encode_uuid(alert.box_id),
        )? {
          return Ok(Err(CoreError::BoxNotFound(alert.box_id)));
        }
        if let Err(e) = check_document(conn, alert.bo_document_id)? {
          return Ok(Err(e));
        }

        conn.execute(
          "INSERT INTO box_alerts (id, box_id, bo_document_id, is_resolved, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            encode_uuid(alert.id),
            encode_uuid(alert.box_id),
            encode_uuid(alert.bo_document_id),
            alert.is_resolved,
            encode_dt(alert.created_at),
          ],
        )?;
        Ok(Ok(alert))
      })
      .await
      .map_err(Error::Database)?
  }

  async fn box_alerts_by_box(
    &self,
    box_id: Uuid,
  ) -> CoreResult<Vec<BoxAlertWithDocument>> {
    let box_str = encode_uuid(box_id);

    let raws: Vec<(RawBoxAlert, RawDocument)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT a.id, a.box_id, a.bo_document_id, a.is_resolved,
                  a.created_at, {DOCUMENT_SELECT_D}
           FROM box_alerts a
           JOIN bo_documents d ON d.id = a.bo_document_id
           WHERE a.box_id = ?1 ORDER BY a.rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![box_str], |row| {
            Ok((RawBoxAlert::from_row(row)?, RawDocument::from_row(row, 5)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    raws
      .into_iter()
      .map(|(alert, document)| {
        Ok(BoxAlertWithDocument {
          alert:    alert.into_alert()?,
          document: document.into_document()?,
        })
      })
      .collect::<Result<Vec<_>>>()
      .map_err(Into::into)
  }

  async fn mark_box_alert_resolved(&self, id: Uuid) -> CoreResult<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE box_alerts SET is_resolved = 1 WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await
      .map_err(Error::Database)?;
    Ok(())
  }
}
