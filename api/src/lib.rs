//! HTTP surface of the Fauth server
//!
//! Auth and admin routes over the credential engine, cookie transport for
//! tokens and the single table mapping domain errors to responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
