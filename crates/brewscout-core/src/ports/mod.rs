//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod session;
mod transport;

pub use cache::{Cache, CacheError};
pub use session::{
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionError, SessionStore, USER_KEY,
};
pub use transport::{HttpTransport, TransportError};
