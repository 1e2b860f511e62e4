//! HTTP surface of the email verification service.
//!
//! Exposed as a library so integration tests can build the app around an
//! in-memory record store.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
