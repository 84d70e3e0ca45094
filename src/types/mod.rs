//! Shared response types.

mod hal;
mod response;

pub use hal::{HalCollection, HalResource, Link, Links};
pub use response::MessageResponse;
