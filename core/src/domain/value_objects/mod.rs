//! Value objects carried across the service boundary.

pub mod credentials;
pub mod health;
pub mod profile;


// Re-export commonly used types
pub use credentials::{LoginRequest, RegisterRequest};
pub use health::StoreHealth;
pub use profile::{MassLogoutStatus, Me};
