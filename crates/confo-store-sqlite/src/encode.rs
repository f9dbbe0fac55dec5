//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, enums as their lowercase wire names, booleans as 0/1 integers.
//! Raw row structs are read inside the connection closure and decoded into
//! domain types outside it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use confo_core::{
  alert::{Alert, Favorite},
  boxes::{BoxAlert, BoxStatus, EntrepriseBox},
  document::{BoDocument, Priority},
  profile::{BureauProfile, EntrepriseProfile},
  user::{User, UserRole},
};

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_role(role: UserRole) -> &'static str {
  match role {
    UserRole::Entreprise => "entreprise",
    UserRole::Particulier => "particulier",
    UserRole::Bureau => "bureau",
  }
}

pub fn decode_role(s: &str) -> Result<UserRole> {
  match s {
    "entreprise" => Ok(UserRole::Entreprise),
    "particulier" => Ok(UserRole::Particulier),
    "bureau" => Ok(UserRole::Bureau),
    other => Err(Error::UnknownEnum { column: "role", value: other.into() }),
  }
}

pub fn encode_priority(priority: Priority) -> &'static str {
  match priority {
    Priority::Urgent => "urgent",
    Priority::Medium => "medium",
    Priority::Low => "low",
  }
}

pub fn decode_priority(s: &str) -> Result<Priority> {
  match s {
    "urgent" => Ok(Priority::Urgent),
    "medium" => Ok(Priority::Medium),
    "low" => Ok(Priority::Low),
    other => {
      Err(Error::UnknownEnum { column: "priority", value: other.into() })
    }
  }
}

pub fn encode_status(status: BoxStatus) -> &'static str {
  match status {
    BoxStatus::Active => "active",
    BoxStatus::Inactive => "inactive",
  }
}

pub fn decode_status(s: &str) -> Result<BoxStatus> {
  match s {
    "active" => Ok(BoxStatus::Active),
    "inactive" => Ok(BoxStatus::Inactive),
    other => Err(Error::UnknownEnum { column: "status", value: other.into() }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `users` row.
pub struct RawUser {
  pub id:           String,
  pub email:        String,
  pub display_name: String,
  pub role:         String,
  pub firebase_uid: Option<String>,
  pub created_at:   String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      email:        row.get(1)?,
      display_name: row.get(2)?,
      role:         row.get(3)?,
      firebase_uid: row.get(4)?,
      created_at:   row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:           decode_uuid(&self.id)?,
      email:        self.email,
      display_name: self.display_name,
      role:         decode_role(&self.role)?,
      firebase_uid: self.firebase_uid,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawEntrepriseProfile {
  pub id:                  String,
  pub user_id:             String,
  pub company_name:        String,
  pub sector:              String,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  pub contact_person:      Option<String>,
}

impl RawEntrepriseProfile {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      user_id:             row.get(1)?,
      company_name:        row.get(2)?,
      sector:              row.get(3)?,
      registration_number: row.get(4)?,
      activity_type:       row.get(5)?,
      location:            row.get(6)?,
      contact_person:      row.get(7)?,
    })
  }

  pub fn into_profile(self) -> Result<EntrepriseProfile> {
    Ok(EntrepriseProfile {
      id:                  decode_uuid(&self.id)?,
      user_id:             decode_uuid(&self.user_id)?,
      company_name:        self.company_name,
      sector:              self.sector,
      registration_number: self.registration_number,
      activity_type:       self.activity_type,
      location:            self.location,
      contact_person:      self.contact_person,
    })
  }
}

pub struct RawBureauProfile {
  pub id:                String,
  pub user_id:           String,
  pub organization_name: String,
  pub legal_identity:    Option<String>,
}

impl RawBureauProfile {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      user_id:           row.get(1)?,
      organization_name: row.get(2)?,
      legal_identity:    row.get(3)?,
    })
  }

  pub fn into_profile(self) -> Result<BureauProfile> {
    Ok(BureauProfile {
      id:                decode_uuid(&self.id)?,
      user_id:           decode_uuid(&self.user_id)?,
      organization_name: self.organization_name,
      legal_identity:    self.legal_identity,
    })
  }
}

/// Raw strings read from a `bo_documents` row. `base` lets the same reader
/// decode a document that appears on the right side of a join.
pub struct RawDocument {
  pub id:           String,
  pub title:        String,
  pub title_ar:     Option<String>,
  pub reference:    String,
  pub publish_date: String,
  pub category:     String,
  pub sector:       Option<String>,
  pub content_fr:   String,
  pub content_ar:   Option<String>,
  pub summary_fr:   Option<String>,
  pub summary_ar:   Option<String>,
  pub priority:     String,
  pub pdf_url:      Option<String>,
}

/// Column list matching [`RawDocument::from_row`], for splicing into SQL.
pub const DOCUMENT_SELECT: &str = "id, title, title_ar, reference, \
   publish_date, category, sector, content_fr, content_ar, summary_fr, \
   summary_ar, priority, pdf_url";

impl RawDocument {
  pub fn from_row(
    row: &rusqlite::Row<'_>,
    base: usize,
  ) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(base)?,
      title:        row.get(base + 1)?,
      title_ar:     row.get(base + 2)?,
      reference:    row.get(base + 3)?,
      publish_date: row.get(base + 4)?,
      category:     row.get(base + 5)?,
      sector:       row.get(base + 6)?,
      content_fr:   row.get(base + 7)?,
      content_ar:   row.get(base + 8)?,
      summary_fr:   row.get(base + 9)?,
      summary_ar:   row.get(base + 10)?,
      priority:     row.get(base + 11)?,
      pdf_url:      row.get(base + 12)?,
    })
  }

  pub fn into_document(self) -> Result<BoDocument> {
    Ok(BoDocument {
      id:           decode_uuid(&self.id)?,
      title:        self.title,
      title_ar:     self.title_ar,
      reference:    self.reference,
      publish_date: decode_dt(&self.publish_date)?,
      category:     self.category,
      sector:       self.sector,
      content_fr:   self.content_fr,
      content_ar:   self.content_ar,
      summary_fr:   self.summary_fr,
      summary_ar:   self.summary_ar,
      priority:     decode_priority(&self.priority)?,
      pdf_url:      self.pdf_url,
    })
  }
}

pub struct RawAlert {
  pub id:             String,
  pub user_id:        String,
  pub bo_document_id: String,
  pub is_read:        bool,
  pub created_at:     String,
}

impl RawAlert {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      user_id:        row.get(1)?,
      bo_document_id: row.get(2)?,
      is_read:        row.get(3)?,
      created_at:     row.get(4)?,
    })
  }

  pub fn into_alert(self) -> Result<Alert> {
    Ok(Alert {
      id:             decode_uuid(&self.id)?,
      user_id:        decode_uuid(&self.user_id)?,
      bo_document_id: decode_uuid(&self.bo_document_id)?,
      is_read:        self.is_read,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawFavorite {
  pub id:             String,
  pub user_id:        String,
  pub bo_document_id: String,
  pub created_at:     String,
}

impl RawFavorite {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      user_id:        row.get(1)?,
      bo_document_id: row.get(2)?,
      created_at:     row.get(3)?,
    })
  }

  pub fn into_favorite(self) -> Result<Favorite> {
    Ok(Favorite {
      id:             decode_uuid(&self.id)?,
      user_id:        decode_uuid(&self.user_id)?,
      bo_document_id: decode_uuid(&self.bo_document_id)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawBox {
  pub id:                  String,
  pub bureau_user_id:      String,
  pub company_name:        String,
  pub sector:              String,
  pub registration_number: Option<String>,
  pub activity_type:       Option<String>,
  pub location:            Option<String>,
  pub status:              String,
  pub created_at:          String,
}

impl RawBox {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      bureau_user_id:      row.get(1)?,
      company_name:        row.get(2)?,
      sector:              row.get(3)?,
      registration_number: row.get(4)?,
      activity_type:       row.get(5)?,
      location:            row.get(6)?,
      status:              row.get(7)?,
      created_at:          row.get(8)?,
    })
  }

  pub fn into_box(self) -> Result<EntrepriseBox> {
    Ok(EntrepriseBox {
      id:                  decode_uuid(&self.id)?,
      bureau_user_id:      decode_uuid(&self.bureau_user_id)?,
      company_name:        self.company_name,
      sector:              self.sector,
      registration_number: self.registration_number,
      activity_type:       self.activity_type,
      location:            self.location,
      status:              decode_status(&self.status)?,
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawBoxAlert {
  pub id:             String,
  pub box_id:         String,
  pub bo_document_id: String,
  pub is_resolved:    bool,
  pub created_at:     String,
}

impl RawBoxAlert {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      box_id:         row.get(1)?,
      bo_document_id: row.get(2)?,
      is_resolved:    row.get(3)?,
      created_at:     row.get(4)?,
    })
  }

  pub fn into_alert(self) -> Result<BoxAlert> {
    Ok(BoxAlert {
      id:             decode_uuid(&self.id)?,
      box_id:         decode_uuid(&self.box_id)?,
      bo_document_id: decode_uuid(&self.bo_document_id)?,
      is_resolved:    self.is_resolved,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}
