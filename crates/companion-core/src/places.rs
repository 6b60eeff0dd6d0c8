//! [`PoiService`] — discovery, favorite reconciliation and favorite toggling.
//!
//! The service owns no state of its own. Every call goes to the discovery
//! client and/or the favorite store, and the favorite flag on a returned
//! [`Poi`] always reflects the store at the moment of the call.

use std::sync::Arc;

use chrono::Utc;
use tokio_stream::Stream;
use tracing::{debug, warn};

use crate::{
  Error, Result,
  client::DiscoveryClient,
  poi::{FavoritePoi, Poi},
  store::FavoriteStore,
};

pub struct PoiService<C, S> {
  client: Arc<C>,
  store:  Arc<S>,
}

impl<C, S> Clone for PoiService<C, S> {
  fn clone(&self) -> Self {
    Self { client: Arc::clone(&self.client), store: Arc::clone(&self.store) }
  }
}

impl<C, S> PoiService<C, S>
where
  C: DiscoveryClient,
  S: FavoriteStore,
{
  pub fn new(client: Arc<C>, store: Arc<S>) -> Self { Self { client, store } }

  // ── Discovery ─────────────────────────────────────────────────────────────

  /// Discover POIs in the bounding box and merge in their favorite state.
  ///
  /// Discovery failures are returned verbatim as [`Error::Discovery`]. The
  /// order of the remote result is preserved. Nothing is written to the
  /// store on this path, so dropping the future at any point is safe.
  pub async fn discover_pois(
    &self,
    sw_corner: &str,
    ne_corner: &str,
    page_size: u32,
  ) -> Result<Vec<Poi>> {
    debug!(sw_corner, ne_corner, page_size, "discovering pois");

    let records = match self.client.discover(sw_corner, ne_corner, page_size).await {
      Ok(records) => records,
      Err(e) => {
        warn!(error = %e, "poi discovery failed");
        return Err(e.into());
      }
    };

    let pois = records.into_iter().map(Poi::from).collect();
    self.apply_favorites(pois).await
  }

  /// Set each POI's favorite flag from the store, keeping list order.
  pub async fn apply_favorites(&self, pois: Vec<Poi>) -> Result<Vec<Poi>> {
    let mut merged = Vec::with_capacity(pois.len());
    for mut poi in pois {
      poi.is_favorite = self.is_favorite(poi.id).await?;
      merged.push(poi);
    }
    Ok(merged)
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  /// All favorites as domain POIs, newest first, re-emitted on every change.
  pub fn favorites_stream(&self) -> impl Stream<Item = Vec<Poi>> + Send + 'static {
    self.store.list_favorites().map_rows(Poi::from)
  }

  pub async fn is_favorite(&self, id: i64) -> Result<bool> {
    self.store.is_favorite(id).await.map_err(Error::store)
  }

  /// Flip the favorite state of `poi` and return the new state.
  ///
  /// When favoriting, the row is a snapshot of `poi`'s current fields stamped
  /// with the current time.
  pub async fn toggle_favorite(&self, poi: &Poi) -> Result<bool> {
    let now_favorite = self
      .store
      .toggle_favorite(snapshot(poi))
      .await
      .map_err(Error::store)?;
    debug!(id = poi.id, now_favorite, "toggled favorite");
    Ok(now_favorite)
  }

  /// Save `poi` as a favorite, replacing any previous snapshot.
  pub async fn add_to_favorites(&self, poi: &Poi) -> Result<()> {
    debug!(id = poi.id, "adding favorite");
    self.store.upsert_favorite(snapshot(poi)).await.map_err(Error::store)
  }

  pub async fn remove_from_favorites(&self, id: i64) -> Result<()> {
    debug!(id, "removing favorite");
    self.store.remove_favorite(id).await.map_err(Error::store)
  }
}

fn snapshot(poi: &Poi) -> FavoritePoi { poi.to_favorite(Utc::now()) }
