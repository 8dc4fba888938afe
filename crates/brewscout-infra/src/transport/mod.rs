//! HTTP transport implementations.

#[cfg(feature = "http")]
mod http;

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(feature = "http")]
pub use http::{ReqwestTransport, TransportConfig};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
