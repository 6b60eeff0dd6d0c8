//! Vehicles in the user's garage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── NewVehicle ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::VehicleStore::insert_vehicle`].
/// The id and `created_at` are always assigned by the store.
///
/// No field is validated: empty strings and any year are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
  pub name:            String,
  pub make:            String,
  pub model:           String,
  pub year:            i32,
  pub hero_image_path: Option<String>,
}

impl NewVehicle {
  pub fn new(
    name: impl Into<String>,
    make: impl Into<String>,
    model: impl Into<String>,
    year: i32,
  ) -> Self {
    Self {
      name: name.into(),
      make: make.into(),
      model: model.into(),
      year,
      hero_image_path: None,
    }
  }
}

// ─── Vehicle ─────────────────────────────────────────────────────────────────

/// A persisted vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
  /// Assigned on insert; always positive.
  pub id:              i64,
  /// Set on insert and never changed by updates.
  pub created_at:      DateTime<Utc>,
  pub name:            String,
  pub make:            String,
  pub model:           String,
  pub year:            i32,
  pub hero_image_path: Option<String>,
}

impl Vehicle {
  /// The user-editable part of this vehicle.
  pub fn details(&self) -> NewVehicle {
    NewVehicle {
      name:            self.name.clone(),
      make:            self.make.clone(),
      model:           self.model.clone(),
      year:            self.year,
      hero_image_path: self.hero_image_path.clone(),
    }
  }

  /// Overwrite the user-editable fields, keeping id and `created_at`.
  pub fn apply(&mut self, details: NewVehicle) {
    self.name = details.name;
    self.make = details.make;
    self.model = details.model;
    self.year = details.year;
    self.hero_image_path = details.hero_image_path;
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// The raw text of the add/edit vehicle form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
  pub name:  String,
  pub make:  String,
  pub model: String,
  pub year:  String,
}

impl VehicleForm {
  /// Trim the text fields and parse the year.
  ///
  /// This is the only place a vehicle can be rejected, and only for a year
  /// that is not an integer.
  pub fn into_new_vehicle(self) -> Result<NewVehicle> {
    let year_text = self.year.trim();
    let year = year_text
      .parse::<i32>()
      .map_err(|_| Error::InvalidYear(year_text.to_owned()))?;

    Ok(NewVehicle {
      name: self.name.trim().to_owned(),
      make: self.make.trim().to_owned(),
      model: self.model.trim().to_owned(),
      year,
      hero_image_path: None,
    })
  }
}

impl From<&Vehicle> for VehicleForm {
  /// Pre-fill the edit form from a stored vehicle.
  fn from(vehicle: &Vehicle) -> Self {
    Self {
      name:  vehicle.name.clone(),
      make:  vehicle.make.clone(),
      model: vehicle.model.clone(),
      year:  vehicle.year.to_string(),
    }
  }
}
