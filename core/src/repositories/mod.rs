pub mod cache;
pub mod user;

pub use cache::{InMemoryRevocationCache, RevocationCache};
pub use user::{InMemoryUserRepository, UserRepository};
