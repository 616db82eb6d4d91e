//! Shared application state handed to every handler

use std::sync::Arc;

use dashmap::DashMap;
use moka::future::Cache;
use panelkit_api::{PageConfig, PageType};
use panelkit_page::custom_renderers;
use panelkit_persistence::DocumentStore;
use panelkit_registry::{CustomRenderers, RenderContext, Registry};
use tokio::sync::Mutex;

use super::config::Configuration;

/// Resolved pages are cached per `(resourceId, pageType)`
pub type PageCacheKey = (String, PageType);

pub struct AppState {
    pub configuration: Configuration,
    pub store: Arc<dyn DocumentStore>,
    pub registry: Arc<Registry>,
    pub customs: CustomRenderers,
    pub page_cache: Cache<PageCacheKey, PageConfig>,
    /// Bumped on every page write; a read only fills the cache if its
    /// epoch is still current
    pub page_epochs: DashMap<PageCacheKey, u64>,
    pub http_client: reqwest::Client,
    /// Serializes resource writes so name uniqueness holds
    pub resource_lock: Mutex<()>,
}

impl AppState {
    pub fn new(
        configuration: Configuration,
        store: Arc<dyn DocumentStore>,
        registry: Arc<Registry>,
    ) -> anyhow::Result<Self> {
        let page_cache = Cache::builder()
            .max_capacity(configuration.page_cache_capacity())
            .time_to_live(configuration.page_cache_ttl())
            .build();

        let http_client = reqwest::Client::builder()
            .timeout(configuration.proxy_timeout())
            .build()?;

        Ok(Self {
            configuration,
            store,
            registry,
            customs: custom_renderers(),
            page_cache,
            page_epochs: DashMap::new(),
            http_client,
            resource_lock: Mutex::new(()),
        })
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.registry, &self.customs)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend())
            .field("cached_pages", &self.page_cache.entry_count())
            .finish_non_exhaustive()
    }
}
