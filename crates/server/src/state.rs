use std::sync::Arc;
use std::time::Duration;

use metasearch_metadata::gateway::Gateway;

use crate::cache::ResponseCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub addon_password: Option<Arc<str>>,
    pub cache: ResponseCache,
}

impl AppState {
    pub fn new(gateway: Gateway, addon_password: Option<String>, cache_ttl: Duration) -> Self {
        Self {
            gateway,
            addon_password: addon_password.map(Arc::from),
            cache: ResponseCache::new(cache_ttl),
        }
    }
}
