//! Encoding and decoding helpers between domain types and SQLite rows.
//!
//! Timestamps are stored as integer nanoseconds since the Unix epoch, so
//! column order is chronological order. Everything else maps onto a native
//! SQLite type.

use chrono::{DateTime, Utc};
use companion_core::{poi::FavoritePoi, vehicle::Vehicle};
use rusqlite::{Connection, Row};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> Result<i64> {
  dt.timestamp_nanos_opt().ok_or(Error::TimestampRange(dt))
}

pub fn decode_dt(nanos: i64) -> DateTime<Utc> { DateTime::from_timestamp_nanos(nanos) }

// ─── Favorites ───────────────────────────────────────────────────────────────

pub const FAVORITE_COLUMNS: &str =
  "id, name, url, category, rating, image_url, latitude, longitude, saved_at";

pub fn favorite_from_row(row: &Row<'_>) -> rusqlite::Result<FavoritePoi> {
  Ok(FavoritePoi {
    id:        row.get(0)?,
    name:      row.get(1)?,
    url:       row.get(2)?,
    category:  row.get(3)?,
    rating:    row.get(4)?,
    image_url: row.get(5)?,
    latitude:  row.get(6)?,
    longitude: row.get(7)?,
    saved_at:  decode_dt(row.get(8)?),
  })
}

/// Full contents of `favorite_pois`, newest save first.
pub fn query_favorites(conn: &Connection) -> rusqlite::Result<Vec<FavoritePoi>> {
  let mut stmt = conn.prepare_cached(&format!(
    "SELECT {FAVORITE_COLUMNS} FROM favorite_pois ORDER BY saved_at DESC, id DESC"
  ))?;
  let rows = stmt
    .query_map([], favorite_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

// ─── Vehicles ────────────────────────────────────────────────────────────────

pub const VEHICLE_COLUMNS: &str =
  "id, created_at, name, make, model, year, hero_image_path";

pub fn vehicle_from_row(row: &Row<'_>) -> rusqlite::Result<Vehicle> {
  Ok(Vehicle {
    id:              row.get(0)?,
    created_at:      decode_dt(row.get(1)?),
    name:            row.get(2)?,
    make:            row.get(3)?,
    model:           row.get(4)?,
    year:            row.get(5)?,
    hero_image_path: row.get(6)?,
  })
}

/// Full contents of `vehicles`, newest first. Ties fall back to insertion
/// order via the autoincrement id.
pub fn query_vehicles(conn: &Connection) -> rusqlite::Result<Vec<Vehicle>> {
  let mut stmt = conn.prepare_cached(&format!(
    "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY created_at DESC, id DESC"
  ))?;
  let rows = stmt
    .query_map([], vehicle_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}
