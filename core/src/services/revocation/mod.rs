//! Revocation facts kept in the shared cache
//!
//! Three independent facts, each with its own TTL:
//! - the global mass-logout cutover timestamp
//! - a per-account kick flag
//! - a per-account recent-ban flag

mod config;
mod store;


pub use config::RevocationStoreConfig;
pub use store::RevocationStore;
