use crate::application::flight::InFlight;
use crate::domain::error::FolpError;
use crate::domain::traits::Upstream;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::HttpUpstream;
use crate::infrastructure::storage::cache::ResponseCache;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ResponseCache>,
    pub flights: Arc<InFlight>,
    pub config: Arc<Config>,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    /// Production wiring: a fresh cache and the reqwest-backed upstream
    pub fn new(config: Config) -> Result<Self, FolpError> {
        let upstream = HttpUpstream::from_config(config.upstream.clone())?;
        let cache = ResponseCache::new(config.cache.ttl(), config.cache.max_entries);
        Ok(Self::with_parts(config, Arc::new(cache), Arc::new(upstream)))
    }

    pub fn with_parts(
        config: Config,
        cache: Arc<ResponseCache>,
        upstream: Arc<dyn Upstream>,
    ) -> Self {
        Self {
            cache,
            flights: Arc::new(InFlight::new()),
            config: Arc::new(config),
            upstream,
        }
    }
}
