//! Core types, trait definitions and services for the vehicle companion.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store backend (`companion-store-sqlite`) and the discovery client
//! (`companion-client`) implement the traits defined here; the services are
//! generic over them.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod error;
pub mod garage;
pub mod live;
pub mod places;
pub mod poi;
pub mod store;
pub mod vehicle;

pub use error::{Error, Result};
