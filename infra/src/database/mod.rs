//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and bundled migrations
//! - The MySQL account directory

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlUserRepository;
