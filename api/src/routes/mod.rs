//! HTTP route handlers
//!
//! - `auth`: registration, login and token lifecycle for account holders
//! - `admin`: revocation commands, restricted to the `admin` role

pub mod admin;
pub mod auth;
