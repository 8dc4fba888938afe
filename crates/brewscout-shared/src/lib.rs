//! # BrewScout Shared
//!
//! Wire types shared between the client and the backend gateway.
//! Kept free of I/O so the crate also compiles for WASM front ends.

pub mod dto;
pub mod pagination;
pub mod response;

pub use pagination::{Page, PaginationHeaders};
pub use response::ApiResponse;
