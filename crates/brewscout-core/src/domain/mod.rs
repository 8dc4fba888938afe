//! Domain entities and transport values.

mod check_in;
mod coffee_shop;
pub mod http;
mod review;
mod user;

pub use check_in::CheckIn;
pub use coffee_shop::{CoffeeShop, ModerationStatus};
pub use http::{FormPart, HttpRequest, HttpResponse, Method, MultipartForm, RequestBody};
pub use review::Review;
pub use user::UserProfile;
