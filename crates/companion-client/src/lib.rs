//! Async HTTP client for the POI discovery endpoint.

use std::time::Duration;

use companion_core::{
  client::DiscoveryClient,
  error::DiscoveryError,
  poi::{DiscoverResponse, PoiRecord},
};
use reqwest::Client;
use tracing::debug;

/// Connection settings for the discovery API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Everything before `/pois/discover`, e.g. `https://api.example.com/api/v2`.
  pub base_url: String,
  /// Whole-request timeout; `None` keeps the transport default.
  pub timeout:  Option<Duration>,
}

/// Async HTTP client for `GET /pois/discover`.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RoadtrippersClient {
  client:   Client,
  base_url: String,
}

impl RoadtrippersClient {
  pub fn new(config: ClientConfig) -> Result<Self, DiscoveryError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(DiscoveryError::transport)?;

    Ok(Self { client, base_url: config.base_url })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }
}

impl DiscoveryClient for RoadtrippersClient {
  /// `GET /pois/discover?sw_corner=..&ne_corner=..&page_size=..`
  async fn discover(
    &self,
    sw_corner: &str,
    ne_corner: &str,
    page_size: u32,
  ) -> Result<Vec<PoiRecord>, DiscoveryError> {
    let resp = self
      .client
      .get(self.url("/pois/discover"))
      .query(&[("sw_corner", sw_corner), ("ne_corner", ne_corner)])
      .query(&[("page_size", page_size)])
      .send()
      .await
      .map_err(DiscoveryError::transport)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(DiscoveryError::Api {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_owned(),
      });
    }

    let body = resp.bytes().await.map_err(DiscoveryError::transport)?;
    let records = decode_body(&body)?;
    debug!(count = records.len(), "decoded discovery response");
    Ok(records)
  }
}

/// Decode a 2xx body. An empty body or a JSON `null` is an empty list.
pub fn decode_body(body: &[u8]) -> Result<Vec<PoiRecord>, DiscoveryError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(Vec::new());
  }
  let parsed: Option<DiscoverResponse> = serde_json::from_slice(body)?;
  Ok(parsed.map(DiscoverResponse::into_records).unwrap_or_default())
}

#[cfg(test)]
mod tests;
