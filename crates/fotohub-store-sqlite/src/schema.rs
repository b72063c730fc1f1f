//! SQL schema for the fotohub SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraints mirror the identity rules of the three entity
/// kinds; the reconciliation engine still double-checks them on read.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS organization_types (
    type_id TEXT PRIMARY KEY,
    name    TEXT NOT NULL,   -- 'club' | 'museum' | 'unknown'
    UNIQUE (name)
);

CREATE TABLE IF NOT EXISTS organizations (
    organization_id       TEXT PRIMARY KEY,
    full_name             TEXT NOT NULL,
    town                  TEXT NOT NULL,
    nickname              TEXT NOT NULL,
    type_id               TEXT NOT NULL REFERENCES organization_types(type_id),
    latitude              REAL,
    longitude             REAL,
    website               TEXT,
    wikipedia             TEXT,
    fotobond_number       INTEGER,
    kvk_number            INTEGER,
    descriptions          TEXT NOT NULL DEFAULT '[]',  -- JSON list
    has_hardcoded_members INTEGER NOT NULL DEFAULT 0,
    UNIQUE (full_name, town)
);

CREATE TABLE IF NOT EXISTS photographers (
    photographer_id TEXT PRIMARY KEY,
    given_name      TEXT NOT NULL,
    infix_name      TEXT NOT NULL DEFAULT '',
    family_name     TEXT NOT NULL,
    is_deceased     INTEGER NOT NULL DEFAULT 0,
    born_on         TEXT,            -- ISO 8601 date
    phone_number    TEXT,
    e_mail          TEXT,
    website         TEXT,
    UNIQUE (given_name, family_name)
);

-- The membership join entity; exclusive per (organization, photographer).
CREATE TABLE IF NOT EXISTS member_portfolios (
    portfolio_id          TEXT PRIMARY KEY,
    organization_id       TEXT NOT NULL REFERENCES organizations(organization_id),
    photographer_id       TEXT NOT NULL REFERENCES photographers(photographer_id),
    is_chairman           INTEGER NOT NULL DEFAULT 0,
    is_vice_chairman      INTEGER NOT NULL DEFAULT 0,
    is_treasurer          INTEGER NOT NULL DEFAULT 0,
    is_secretary          INTEGER NOT NULL DEFAULT 0,
    is_admin              INTEGER NOT NULL DEFAULT 0,
    is_former_member      INTEGER NOT NULL DEFAULT 0,
    is_honorary_member    INTEGER NOT NULL DEFAULT 0,
    is_prospective_member INTEGER NOT NULL DEFAULT 0,
    is_mentor             INTEGER NOT NULL DEFAULT 0,
    membership_start      TEXT,
    membership_end        TEXT,
    member_website        TEXT,
    featured_image        TEXT,
    featured_thumbnail    TEXT,
    UNIQUE (organization_id, photographer_id)
);

CREATE INDEX IF NOT EXISTS portfolios_org_idx
    ON member_portfolios(organization_id);
CREATE INDEX IF NOT EXISTS portfolios_photographer_idx
    ON member_portfolios(photographer_id);
CREATE INDEX IF NOT EXISTS photographers_name_idx
    ON photographers(given_name, family_name);

PRAGMA user_version = 1;
";
