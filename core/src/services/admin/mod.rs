//! Administration service: bans, kicks and mass logout

mod service;

#[cfg(test)]
mod tests;

pub use service::AdministrationService;
