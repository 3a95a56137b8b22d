//! Response mapping shared by all routes

pub mod error;

pub use error::{classify, ApiError, ApiResult};
