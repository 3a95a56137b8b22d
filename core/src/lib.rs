//! # Fauth Core
//!
//! Credential lifecycle engine for the Fauth backend.
//! This crate contains the account and session entities, the signed token codec,
//! password strategies, the revocation store and the two services that compose
//! them: credential issuance and administration.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
