//! [`SqliteStore`] — the SQLite implementation of [`FavoriteStore`] and
//! [`VehicleStore`].

use std::{path::Path, sync::Arc};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tokio::sync::watch;
use tracing::debug;

use companion_core::{
  live::LiveQuery,
  poi::FavoritePoi,
  store::{FavoriteStore, VehicleStore},
  vehicle::{NewVehicle, Vehicle},
};

use crate::{
  Result,
  encode::{
    VEHICLE_COLUMNS, encode_dt, query_favorites, query_vehicles, vehicle_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Favorite and vehicle tables backed by a single SQLite file.
///
/// Cloning is cheap — the connection and both snapshot channels are
/// reference-counted, so every clone shares the same live queries.
///
/// Writes run on the connection's single worker thread. Each write re-reads
/// its table and publishes the snapshot from inside the same call, so
/// subscribers observe snapshots in commit order.
#[derive(Clone)]
pub struct SqliteStore {
  conn:      tokio_rusqlite::Connection,
  favorites: Arc<watch::Sender<Vec<FavoritePoi>>>,
  vehicles:  Arc<watch::Sender<Vec<Vehicle>>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let (favorites, vehicles) = conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok((query_favorites(conn)?, query_vehicles(conn)?))
      })
      .await?;

    Ok(Self {
      conn,
      favorites: Arc::new(watch::Sender::new(favorites)),
      vehicles: Arc::new(watch::Sender::new(vehicles)),
    })
  }
}

// ─── FavoriteStore impl ──────────────────────────────────────────────────────

impl FavoriteStore for SqliteStore {
  type Error = crate::Error;

  fn list_favorites(&self) -> LiveQuery<FavoritePoi> {
    LiveQuery::new(self.favorites.subscribe())
  }

  async fn is_favorite(&self, id: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT EXISTS(SELECT 1 FROM favorite_pois WHERE id = ?1)",
          rusqlite::params![id],
          |row| row.get::<_, bool>(0),
        )?)
      })
      .await?;
    Ok(exists)
  }

  async fn upsert_favorite(&self, record: FavoritePoi) -> Result<()> {
    let saved_at = encode_dt(record.saved_at)?;
    let tx = Arc::clone(&self.favorites);

    self
      .conn
      .call(move |conn| {
        insert_favorite(conn, &record, saved_at)?;
        tx.send_replace(query_favorites(conn)?);
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn remove_favorite(&self, id: i64) -> Result<()> {
    let tx = Arc::clone(&self.favorites);

    self
      .conn
      .call(move |conn| {
        let removed =
          conn.execute("DELETE FROM favorite_pois WHERE id = ?1", rusqlite::params![id])?;
        if removed > 0 {
          tx.send_replace(query_favorites(conn)?);
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn toggle_favorite(&self, record: FavoritePoi) -> Result<bool> {
    let saved_at = encode_dt(record.saved_at)?;
    let tx = Arc::clone(&self.favorites);

    let now_favorite = self
      .conn
      .call(move |conn| {
        let txn = conn.transaction()?;
        let removed = txn.execute(
          "DELETE FROM favorite_pois WHERE id = ?1",
          rusqlite::params![record.id],
        )?;
        if removed == 0 {
          insert_favorite(&txn, &record, saved_at)?;
        }
        txn.commit()?;

        tx.send_replace(query_favorites(conn)?);
        Ok(removed == 0)
      })
      .await?;
    Ok(now_favorite)
  }
}

fn insert_favorite(
  conn: &rusqlite::Connection,
  record: &FavoritePoi,
  saved_at: i64,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT OR REPLACE INTO favorite_pois (
       id, name, url, category, rating, image_url, latitude, longitude, saved_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    rusqlite::params![
      record.id,
      record.name,
      record.url,
      record.category,
      record.rating,
      record.image_url,
      record.latitude,
      record.longitude,
      saved_at,
    ],
  )?;
  Ok(())
}

// ─── VehicleStore impl ───────────────────────────────────────────────────────

impl VehicleStore for SqliteStore {
  type Error = crate::Error;

  fn list_vehicles(&self) -> LiveQuery<Vehicle> { LiveQuery::new(self.vehicles.subscribe()) }

  async fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>> {
    let vehicle = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?1"),
            rusqlite::params![id],
            vehicle_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(vehicle)
  }

  async fn insert_vehicle(&self, input: NewVehicle) -> Result<Vehicle> {
    let created_at = Utc::now();
    let created_at_nanos = encode_dt(created_at)?;
    let tx = Arc::clone(&self.vehicles);

    let NewVehicle { name, make, model, year, hero_image_path } = input;
    let row = (name.clone(), make.clone(), model.clone(), hero_image_path.clone());

    let id = self
      .conn
      .call(move |conn| {
        let (name, make, model, hero_image_path) = row;
        conn.execute(
          "INSERT INTO vehicles (name, make, model, year, hero_image_path, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![name, make, model, year, hero_image_path, created_at_nanos],
        )?;
        let id = conn.last_insert_rowid();
        tx.send_replace(query_vehicles(conn)?);
        Ok(id)
      })
      .await?;

    debug!(id, "inserted vehicle");
    Ok(Vehicle { id, created_at, name, make, model, year, hero_image_path })
  }

  async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<bool> {
    let id = vehicle.id;
    let NewVehicle { name, make, model, year, hero_image_path } = vehicle.details();
    let tx = Arc::clone(&self.vehicles);

    let updated = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE vehicles
             SET name = ?2, make = ?3, model = ?4, year = ?5, hero_image_path = ?6
           WHERE id = ?1",
          rusqlite::params![id, name, make, model, year, hero_image_path],
        )?;
        if updated > 0 {
          tx.send_replace(query_vehicles(conn)?);
        }
        Ok(updated > 0)
      })
      .await?;
    Ok(updated)
  }

  async fn delete_vehicle(&self, id: i64) -> Result<()> {
    let tx = Arc::clone(&self.vehicles);

    self
      .conn
      .call(move |conn| {
        let deleted =
          conn.execute("DELETE FROM vehicles WHERE id = ?1", rusqlite::params![id])?;
        if deleted > 0 {
          tx.send_replace(query_vehicles(conn)?);
        }
        Ok(())
      })
      .await?;
    Ok(())
  }
}
