//! Request and response bodies

pub mod admin_dto;
pub mod auth_dto;

pub use admin_dto::{AccountPath, AdminActionResponse};
pub use auth_dto::{AccessTokenResponse, LogoutResponse, TokenPairResponse};
