//! Request plumbing shared by the routes
//!
//! - Token cookies: reading and writing the access and refresh cookies
//! - Deadline: bounding service calls by the configured request timeout

pub mod cookies;
pub mod deadline;

pub use cookies::TokenCookies;
pub use deadline::within;
