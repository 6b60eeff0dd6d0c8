//! [`GarageService`] — vehicle CRUD between the domain model and the store.

use std::sync::Arc;

use tokio_stream::Stream;
use tracing::debug;

use crate::{
  Error, Result,
  store::VehicleStore,
  vehicle::{NewVehicle, Vehicle, VehicleForm},
};

pub struct GarageService<S> {
  store: Arc<S>,
}

impl<S> Clone for GarageService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> GarageService<S>
where
  S: VehicleStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All vehicles, newest first, re-emitted on every change.
  pub fn vehicles_stream(&self) -> impl Stream<Item = Vec<Vehicle>> + Send + 'static {
    self.store.list_vehicles().into_stream()
  }

  /// The current garage contents, newest first.
  pub fn list_vehicles(&self) -> Vec<Vehicle> { self.store.list_vehicles().current() }

  pub async fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>> {
    self.store.get_vehicle(id).await.map_err(Error::store)
  }

  /// Persist a new vehicle and return its assigned id.
  pub async fn create_vehicle(&self, input: NewVehicle) -> Result<i64> {
    let vehicle = self.store.insert_vehicle(input).await.map_err(Error::store)?;
    debug!(id = vehicle.id, "created vehicle");
    Ok(vehicle.id)
  }

  /// Replace the stored row with `vehicle`. A missing id is a silent no-op.
  pub async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
    let matched = self.store.update_vehicle(vehicle).await.map_err(Error::store)?;
    debug!(id = vehicle.id, matched, "updated vehicle");
    Ok(())
  }

  pub async fn delete_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
    debug!(id = vehicle.id, "deleting vehicle");
    self.store.delete_vehicle(vehicle.id).await.map_err(Error::store)
  }

  /// Save the add/edit form.
  ///
  /// With no `id` a new vehicle is created. With an `id` the existing vehicle
  /// is updated, keeping its hero image; if it no longer exists nothing is
  /// written. Returns the id the form was saved under.
  pub async fn save_form(&self, id: Option<i64>, form: VehicleForm) -> Result<i64> {
    let mut details = form.into_new_vehicle()?;

    let Some(id) = id else {
      return self.create_vehicle(details).await;
    };

    if let Some(mut existing) = self.get_vehicle(id).await? {
      details.hero_image_path = existing.hero_image_path.take();
      existing.apply(details);
      self.update_vehicle(&existing).await?;
    }
    Ok(id)
  }
}
