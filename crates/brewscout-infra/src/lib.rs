//! # BrewScout Infrastructure
//!
//! Concrete implementations of the ports defined in `brewscout-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory adapters only
//! - `http` - reqwest-backed [`ReqwestTransport`]
//! - `mock` - scripted `MockTransport` for downstream tests

pub mod cache;
pub mod session;
pub mod transport;

pub use cache::InMemoryCache;
pub use session::{FileSessionStore, InMemorySessionStore};

#[cfg(feature = "http")]
pub use transport::{ReqwestTransport, TransportConfig};

#[cfg(any(test, feature = "mock"))]
pub use transport::MockTransport;
