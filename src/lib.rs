//! Single-password gate for axum applications.
//!
//! Wrap an application router with [`routes::router`] to require a signed,
//! time-limited session cookie on every path matching the configured
//! pattern. Visitors without a valid session are redirected to a password
//! form; a correct password sets the `nextpwd_token` cookie.

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::{AppState, router};
