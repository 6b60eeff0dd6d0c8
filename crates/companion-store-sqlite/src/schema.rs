//! SQL schema for the companion SQLite store.
//!
//! Executed once at connection startup. The layout is fixed at
//! `PRAGMA user_version = 1`; there are no migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The user's garage. Ids are never reused.
CREATE TABLE IF NOT EXISTS vehicles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT    NOT NULL,
    make            TEXT    NOT NULL,
    model           TEXT    NOT NULL,
    year            INTEGER NOT NULL,
    hero_image_path TEXT,
    created_at      INTEGER NOT NULL   -- unix nanoseconds; set once on insert
);

-- One row per favorited POI, keyed by the remote POI id.
-- Re-favoriting replaces the row.
CREATE TABLE IF NOT EXISTS favorite_pois (
    id        INTEGER PRIMARY KEY,
    name      TEXT    NOT NULL,
    url       TEXT,
    category  TEXT,
    rating    INTEGER,
    image_url TEXT,
    latitude  REAL,
    longitude REAL,
    saved_at  INTEGER NOT NULL         -- unix nanoseconds
);

CREATE INDEX IF NOT EXISTS vehicles_created_idx     ON vehicles(created_at);
CREATE INDEX IF NOT EXISTS favorite_pois_saved_idx  ON favorite_pois(saved_at);

PRAGMA user_version = 1;
";
