use std::net::SocketAddr;
use std::time::Duration;

use crate::store::{Store, StoreProfile};

/// Process-wide configuration, resolved once at startup and then shared
/// read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: Store,
    pub profile: StoreProfile,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cache_ttl: Duration,
    pub user_agent: String,
}

impl AppConfig {
    /// Switches to another store, keeping a custom API endpoint only if the
    /// current one was overridden.
    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        let overridden = self.profile.api_url != self.store.profile().api_url;
        let mut profile = store.profile();
        if overridden {
            profile.api_url = self.profile.api_url;
        }
        self.store = store;
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }
}
