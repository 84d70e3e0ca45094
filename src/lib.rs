//! Usuarios service - user registry HTTP API.
//!
//! Registration with field validation, partial profile updates, credential
//! checks and region/commune lookups relayed from an external location
//! service.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve`, `migrate` and `seed`
//! - **config**: environment configuration and constants
//! - **domain**: the user entity, patches, password hashing and format rules
//! - **services**: creation rules, update merge, login
//! - **infra**: PostgreSQL persistence and the location HTTP client
//! - **api**: axum handlers and routes
//! - **types**: HAL response envelopes
//! - **errors**: error type and its HTTP mapping
//!
//! ```bash
//! cargo run -- migrate up
//! cargo run -- serve --port 8080
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{NewUser, Password, User, UserPatch};
pub use errors::{AppError, AppResult};
