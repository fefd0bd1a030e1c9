pub mod auth;

pub use auth::gate_middleware;
