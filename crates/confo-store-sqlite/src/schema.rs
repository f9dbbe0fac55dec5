//! SQL schema for the ConfoUP SQLite store.
//!
//! Executed once at connection startup. The UNIQUE constraints back the
//! conflict contract of the store trait; the foreign-key clauses back its
//! restrict-at-create policy. `latest_bo_documents` orders by
//! `publish_date DESC, rowid ASC` — documents are never deleted, so the
//! implicit rowid is a faithful insertion-order tie-break.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id           TEXT PRIMARY KEY,
    email        TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    role         TEXT NOT NULL,    -- 'entreprise' | 'particulier' | 'bureau'
    firebase_uid TEXT UNIQUE,      -- NULLs exempt from the constraint
    created_at   TEXT NOT NULL
);

-- One profile per user, enforced by UNIQUE(user_id).
CREATE TABLE IF NOT EXISTS entreprise_profiles (
    id                  TEXT PRIMARY KEY,
    user_id             TEXT NOT NULL UNIQUE REFERENCES users(id),
    company_name        TEXT NOT NULL,
    sector              TEXT NOT NULL,
    registration_number TEXT,
    activity_type       TEXT,
    location            TEXT,
    contact_person      TEXT
);

CREATE TABLE IF NOT EXISTS bureau_profiles (
    id                TEXT PRIMARY KEY,
    user_id           TEXT NOT NULL UNIQUE REFERENCES users(id),
    organization_name TEXT NOT NULL,
    legal_identity    TEXT
);

-- Bulletins are immutable once published: inserted by ingestion, then only
-- ever read and joined against.
CREATE TABLE IF NOT EXISTS bo_documents (
    id           TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    title_ar     TEXT,
    reference    TEXT NOT NULL UNIQUE,
    publish_date TEXT NOT NULL,
    category     TEXT NOT NULL,
    sector       TEXT,
    content_fr   TEXT NOT NULL,
    content_ar   TEXT,
    summary_fr   TEXT,
    summary_ar   TEXT,
    priority     TEXT NOT NULL DEFAULT 'medium',
    pdf_url      TEXT
);

CREATE TABLE IF NOT EXISTS alerts (
    id             TEXT PRIMARY KEY,
    user_id        TEXT NOT NULL REFERENCES users(id),
    bo_document_id TEXT NOT NULL REFERENCES bo_documents(id),
    is_read        INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS favorites (
    id             TEXT PRIMARY KEY,
    user_id        TEXT NOT NULL REFERENCES users(id),
    bo_document_id TEXT NOT NULL REFERENCES bo_documents(id),
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS entreprise_boxes (
    id                  TEXT PRIMARY KEY,
    bureau_user_id      TEXT NOT NULL REFERENCES users(id),
    company_name        TEXT NOT NULL,
    sector              TEXT NOT NULL,
    registration_number TEXT,
    activity_type       TEXT,
    location            TEXT,
    status              TEXT NOT NULL DEFAULT 'active',
    created_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS box_alerts (
    id             TEXT PRIMARY KEY,
    box_id         TEXT NOT NULL REFERENCES entreprise_boxes(id),
    bo_document_id TEXT NOT NULL REFERENCES bo_documents(id),
    is_resolved    INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS users_firebase_uid_idx ON users(firebase_uid);
CREATE INDEX IF NOT EXISTS documents_publish_idx  ON bo_documents(publish_date);
CREATE INDEX IF NOT EXISTS alerts_user_idx        ON alerts(user_id);
CREATE INDEX IF NOT EXISTS favorites_user_idx     ON favorites(user_id);
CREATE INDEX IF NOT EXISTS boxes_bureau_idx       ON entreprise_boxes(bureau_user_id);
CREATE INDEX IF NOT EXISTS box_alerts_box_idx     ON box_alerts(box_id);

PRAGMA user_version = 1;
";
