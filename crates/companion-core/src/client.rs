//! The `DiscoveryClient` trait.

use std::future::Future;

use crate::{error::DiscoveryError, poi::PoiRecord};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Remote source of POIs inside a bounding box.
///
/// Implementations issue exactly one request per call: no retries and no
/// pagination beyond the requested page. Dropping the returned future must
/// abandon the request.
pub trait DiscoveryClient: Send + Sync {
  /// Discover POIs between two corners, each formatted as `"lon,lat"`.
  ///
  /// Corner strings are passed through unvalidated; a malformed corner is
  /// reported by the remote source, if at all.
  fn discover<'a>(
    &'a self,
    sw_corner: &'a str,
    ne_corner: &'a str,
    page_size: u32,
  ) -> impl Future<Output = Result<Vec<PoiRecord>, DiscoveryError>> + Send + 'a;
}
