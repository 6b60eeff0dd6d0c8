//! Tests against a local axum server standing in for the discovery endpoint.

use std::collections::HashMap;

use axum::{
  Json, Router,
  extract::Query,
  http::StatusCode,
  routing::get,
};
use companion_core::{client::DiscoveryClient, error::DiscoveryError};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::{ClientConfig, RoadtrippersClient, decode_body};

const SW: &str = "-122.5280,37.7049";
const NE: &str = "-122.3480,37.8349";

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, router).await.unwrap();
  });
  format!("http://{addr}/api/v2")
}

fn client(base_url: String) -> RoadtrippersClient {
  RoadtrippersClient::new(ClientConfig { base_url, timeout: None }).unwrap()
}

fn discover_route<H, T>(handler: H) -> Router
where
  H: axum::handler::Handler<T, ()>,
  T: 'static,
{
  Router::new().route("/api/v2/pois/discover", get(handler))
}

// ─── Success ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn decodes_pois_and_sends_query() {
  async fn handler(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
      "pois": [{
        "id": 1,
        "name": format!("{}|{}|{}", q["sw_corner"], q["ne_corner"], q["page_size"]),
        "url": "https://example.com/restaurant",
        "primary_category_display_name": "Restaurant",
        "rating": 4.5,
        "v_320x320_url": "https://example.com/restaurant.jpg",
        "loc": [37.7749, -122.4194]
      }, {
        "id": 2,
        "name": "Bare",
        "url": null,
        "primary_category_display_name": null,
        "rating": null,
        "v_320x320_url": null,
        "loc": null
      }]
    }))
  }

  let base = serve(discover_route(handler)).await;
  let records = client(base).discover(SW, NE, 25).await.unwrap();

  assert_eq!(records.len(), 2);
  assert_eq!(records[0].name, format!("{SW}|{NE}|25"));
  assert_eq!(records[0].rating, Some(4.5));
  assert_eq!(records[0].loc, Some(vec![37.7749, -122.4194]));
  assert_eq!(records[1].name, "Bare");
  assert_eq!(records[1].loc, None);
}

#[tokio::test]
async fn empty_pois_array_is_empty() {
  let base = serve(discover_route(|| async { Json(json!({ "pois": [] })) })).await;
  assert!(client(base).discover(SW, NE, 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn null_body_is_empty() {
  let base = serve(discover_route(|| async { "null" })).await;
  assert!(client(base).discover(SW, NE, 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_body_is_empty() {
  let base = serve(discover_route(|| async { StatusCode::OK })).await;
  assert!(client(base).discover(SW, NE, 50).await.unwrap().is_empty());
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn not_found_is_api_error() {
  let base = serve(discover_route(|| async { (StatusCode::NOT_FOUND, "Not Found") })).await;

  let err = client(base).discover(SW, NE, 50).await.unwrap_err();

  assert_eq!(err.status(), Some(404));
  assert_eq!(err.to_string(), "API Error: 404 Not Found");
}

#[tokio::test]
async fn server_error_is_api_error() {
  let base = serve(discover_route(|| async { StatusCode::SERVICE_UNAVAILABLE })).await;

  let err = client(base).discover(SW, NE, 50).await.unwrap_err();

  assert!(matches!(err, DiscoveryError::Api { status: 503, ref reason } if reason == "Service Unavailable"));
}

#[tokio::test]
async fn unknown_path_is_api_error() {
  let base = serve(Router::new()).await;
  let err = client(base).discover(SW, NE, 50).await.unwrap_err();
  assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let err = client(format!("http://{addr}"))
    .discover(SW, NE, 50)
    .await
    .unwrap_err();

  let DiscoveryError::Transport(inner) = err else {
    panic!("expected transport error");
  };
  let reqwest_err = inner.downcast_ref::<reqwest::Error>().expect("reqwest error");
  assert!(reqwest_err.is_connect());
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
  let base = serve(discover_route(|| async { "{\"pois\": [" })).await;
  let err = client(base).discover(SW, NE, 50).await.unwrap_err();
  assert!(matches!(err, DiscoveryError::Decode(_)));
}

// ─── Body decoding ───────────────────────────────────────────────────────────

#[test]
fn decode_body_handles_null_forms() {
  assert!(decode_body(b"").unwrap().is_empty());
  assert!(decode_body(b"  \n").unwrap().is_empty());
  assert!(decode_body(b"null").unwrap().is_empty());
  assert!(decode_body(br#"{"pois": null}"#).unwrap().is_empty());
  assert!(decode_body(b"{}").unwrap().is_empty());
}
