//! Points of interest — the wire record, the favorite row and the domain view.
//!
//! A POI reaches the app in one of two shapes: a transient [`PoiRecord`]
//! decoded from the discovery endpoint, or a durable [`FavoritePoi`] row.
//! Both are flattened into the same [`Poi`] domain model; the favorite flag is
//! never stored on either source and is computed against the favorite store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Wire ────────────────────────────────────────────────────────────────────

/// One entry of the discovery endpoint's `pois` array.
///
/// Absent fields and explicit `null`s both decode to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
  pub id:                            i64,
  pub name:                          String,
  #[serde(default)]
  pub url:                           Option<String>,
  #[serde(default)]
  pub primary_category_display_name: Option<String>,
  /// 0–5 as supplied by the remote source; not validated.
  #[serde(default)]
  pub rating:                        Option<f64>,
  #[serde(default, rename = "v_320x320_url")]
  pub image_url:                     Option<String>,
  /// `[latitude, longitude]`.
  #[serde(default)]
  pub loc:                           Option<Vec<f64>>,
}

/// Body of `GET /pois/discover`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverResponse {
  #[serde(default)]
  pub pois: Option<Vec<PoiRecord>>,
}

impl DiscoverResponse {
  /// The decoded records; a null or missing `pois` array is an empty list.
  pub fn into_records(self) -> Vec<PoiRecord> { self.pois.unwrap_or_default() }
}

// ─── Durable ─────────────────────────────────────────────────────────────────

/// A row of the `favorite_pois` table.
///
/// Display fields are a snapshot taken when the POI was favorited; saving the
/// same id again replaces the whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritePoi {
  pub id:        i64,
  pub name:      String,
  pub url:       Option<String>,
  pub category:  Option<String>,
  pub rating:    Option<i32>,
  pub image_url: Option<String>,
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
  pub saved_at:  DateTime<Utc>,
}

// ─── Domain ──────────────────────────────────────────────────────────────────

/// The POI as presented to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
  pub id:          i64,
  pub name:        String,
  pub url:         Option<String>,
  pub category:    Option<String>,
  pub rating:      Option<i32>,
  pub image_url:   Option<String>,
  pub latitude:    Option<f64>,
  pub longitude:   Option<f64>,
  pub is_favorite: bool,
}

impl Poi {
  /// A copy of this POI with the favorite flag replaced.
  pub fn with_favorite(&self, is_favorite: bool) -> Self {
    Self { is_favorite, ..self.clone() }
  }

  /// Snapshot this POI into a favorite row stamped with `saved_at`.
  pub fn to_favorite(&self, saved_at: DateTime<Utc>) -> FavoritePoi {
    FavoritePoi {
      id: self.id,
      name: self.name.clone(),
      url: self.url.clone(),
      category: self.category.clone(),
      rating: self.rating,
      image_url: self.image_url.clone(),
      latitude: self.latitude,
      longitude: self.longitude,
      saved_at,
    }
  }
}

impl From<PoiRecord> for Poi {
  /// Discovery results start out as non-favorites; the caller merges the
  /// favorite flag from the store.
  fn from(record: PoiRecord) -> Self {
    // The endpoint's `loc` is treated as [lat, lon]. This has not been
    // confirmed against the live service.
    let (latitude, longitude) = match record.loc.as_deref() {
      Some(loc) => (loc.first().copied(), loc.get(1).copied()),
      None => (None, None),
    };

    Self {
      id: record.id,
      name: record.name,
      url: record.url,
      category: record.primary_category_display_name,
      rating: record.rating.map(|r| r.round() as i32),
      image_url: record.image_url,
      latitude,
      longitude,
      is_favorite: false,
    }
  }
}

impl From<FavoritePoi> for Poi {
  /// Every stored row is a favorite.
  fn from(row: FavoritePoi) -> Self {
    Self {
      id:          row.id,
      name:        row.name,
      url:         row.url,
      category:    row.category,
      rating:      row.rating,
      image_url:   row.image_url,
      latitude:    row.latitude,
      longitude:   row.longitude,
      is_favorite: true,
    }
  }
}
