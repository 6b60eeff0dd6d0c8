//! Continuously-updating views over a store table.
//!
//! A store owns one `watch` sender per table and publishes a full snapshot
//! after every write. Each [`LiveQuery`] holds its own receiver, so observers
//! are independent and dropping one cancels only that subscription. Rapid
//! writes may be coalesced: an observer always sees the latest snapshot, not
//! necessarily every intermediate one.

use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt as _, wrappers::WatchStream};

/// A subscription to the ordered contents of a table.
#[derive(Debug, Clone)]
pub struct LiveQuery<T> {
  rx: watch::Receiver<Vec<T>>,
}

impl<T> LiveQuery<T>
where
  T: Clone + Send + Sync + 'static,
{
  pub fn new(rx: watch::Receiver<Vec<T>>) -> Self { Self { rx } }

  /// The most recently published snapshot.
  pub fn current(&self) -> Vec<T> { self.rx.borrow().clone() }

  /// Wait for the next snapshot. Returns `None` once the publishing store has
  /// been dropped.
  pub async fn changed(&mut self) -> Option<Vec<T>> {
    self.rx.changed().await.ok()?;
    Some(self.rx.borrow_and_update().clone())
  }

  /// A stream yielding the current snapshot immediately, then every later one.
  pub fn into_stream(self) -> impl Stream<Item = Vec<T>> + Send + 'static {
    WatchStream::new(self.rx)
  }

  /// Like [`LiveQuery::into_stream`], mapping each row with `f`.
  pub fn map_rows<U, F>(self, f: F) -> impl Stream<Item = Vec<U>> + Send + 'static
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + 'static,
  {
    self
      .into_stream()
      .map(move |rows| rows.into_iter().map(&f).collect())
  }
}
