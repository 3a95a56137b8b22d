use serde::Serialize;

/// Reachability of the stores behind the credential flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreHealth {
    pub directory: bool,
    pub cache: bool,
}

impl StoreHealth {
    pub fn is_healthy(&self) -> bool {
        self.directory && self.cache
    }
}
