//! HTTP request handlers.

pub mod location_handler;
pub mod user_handler;

pub use location_handler::location_routes;
pub use user_handler::user_routes;
