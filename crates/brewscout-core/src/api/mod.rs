//! Typed wrappers, one per gateway path family.
//!
//! Each wrapper owns a clone of the shared [`ApiClient`](crate::client::ApiClient)
//! and invalidates its own cache prefix after mutations.

mod auth;
mod check_ins;
mod coffee_shops;
mod moderation;
mod reviews;

pub use auth::{AuthApi, AuthSession};
pub use check_ins::{CHECK_INS_PATH, CheckInApi};
pub use coffee_shops::{COFFEE_SHOPS_PATH, CoffeeShopApi, ShopQuery};
pub use moderation::{MODERATION_PATH, ModerationApi};
pub use reviews::{REVIEWS_PATH, ReviewApi};
