//! Domain entities representing core business objects.

pub mod account;
pub mod session;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use account::{Account, AccountId, NewAccount, ADMIN_ROLE};
pub use session::{SessionClaims, SessionPayload, TokenPair, TokenType};
