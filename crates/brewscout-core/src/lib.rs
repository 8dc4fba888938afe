//! # BrewScout Core
//!
//! The client-side core of BrewScout: domain entities, the ports the client
//! depends on, the resilient [`ApiClient`](client::ApiClient), and typed
//! wrappers for each gateway resource.
//! Concrete I/O lives in `brewscout-infra`.

pub mod api;
pub mod client;
pub mod domain;
pub mod error;
pub mod ports;

pub use client::{ApiClient, ApiConfig, ApiRequest, QueryParams};
pub use error::{ApiError, ClientError};
