//! The `FavoriteStore` and `VehicleStore` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `companion-store-sqlite`). The services in this crate depend on these
//! abstractions, not on any concrete backend. One backend instance is shared
//! by every service that needs it.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes.

use std::future::Future;

use crate::{
  live::LiveQuery,
  poi::FavoritePoi,
  vehicle::{NewVehicle, Vehicle},
};

// ─── Favorites ───────────────────────────────────────────────────────────────

/// Durable, id-keyed collection of favorited POIs.
pub trait FavoriteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Subscribe to all favorites, most recently saved first.
  fn list_favorites(&self) -> LiveQuery<FavoritePoi>;

  /// Whether a row with this id exists.
  fn is_favorite(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert `record`, replacing any existing row with the same id.
  fn upsert_favorite(
    &self,
    record: FavoritePoi,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete the row with this id. Deleting a missing row is not an error.
  fn remove_favorite(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Atomically flip the favorite state of `record.id`.
  ///
  /// If the row exists it is deleted; otherwise `record` is inserted. The
  /// check and the write happen under one transaction. Returns the new state.
  fn toggle_favorite(
    &self,
    record: FavoritePoi,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Vehicles ────────────────────────────────────────────────────────────────

/// Durable, auto-keyed collection of vehicles.
pub trait VehicleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Subscribe to all vehicles, most recently created first.
  fn list_vehicles(&self) -> LiveQuery<Vehicle>;

  /// Retrieve a vehicle by id. Returns `None` if not found.
  fn get_vehicle(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Vehicle>, Self::Error>> + Send + '_;

  /// Persist a new vehicle. The id and `created_at` are set by the store.
  fn insert_vehicle(
    &self,
    input: NewVehicle,
  ) -> impl Future<Output = Result<Vehicle, Self::Error>> + Send + '_;

  /// Replace the editable fields of the row with `vehicle.id`.
  ///
  /// `created_at` is left untouched. Returns `false` when no row matched.
  fn update_vehicle<'a>(
    &'a self,
    vehicle: &'a Vehicle,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Delete by id. Deleting a missing row is not an error.
  fn delete_vehicle(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
