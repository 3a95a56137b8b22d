//! Expiring key/value store holding revocation facts.

mod r#trait;
pub use r#trait::RevocationCache;

mod memory;
pub use memory::InMemoryRevocationCache;
