use crate::browse::BrowseMachine;
use crate::catalog::{self, CatalogGateway, MovieId};
use crate::config::AppConfig;
use crate::details::MovieView;
use crate::favorites::FavoritesStore;
use crate::session::SearchMemory;
use crate::storage::{FileStore, KeyValueStore};
use std::sync::Arc;
use tracing::info;

/// Composition root owning every piece of client state
pub struct App {
    gateway: Arc<dyn CatalogGateway>,
    favorites: Arc<FavoritesStore>,
    memory: SearchMemory,
    browse: Arc<BrowseMachine>,
}

impl App {
    pub fn new(gateway: Arc<dyn CatalogGateway>, store: Arc<dyn KeyValueStore>) -> Self {
        let memory = SearchMemory::new(store.clone());
        let favorites = Arc::new(FavoritesStore::load(store));
        let browse = Arc::new(BrowseMachine::new(gateway.clone(), memory.clone()));

        Self {
            gateway,
            favorites,
            memory,
            browse,
        }
    }

    /// Wire up the TMDB gateway and file-backed storage
    pub fn from_config(config: &AppConfig) -> catalog::Result<Self> {
        let gateway = catalog::create_default_gateway(&config.catalog)?;
        let data_dir = config.storage.data_dir();
        info!("Using data directory {}", data_dir.display());

        Ok(Self::new(gateway, Arc::new(FileStore::new(data_dir))))
    }

    /// Load trending and replay the remembered search
    pub async fn start(&self) {
        self.browse.start().await;
    }

    /// Replay only the remembered search, without touching trending.
    /// Returns false when there is nothing to resume.
    pub async fn resume_search(&self) -> bool {
        let Some(query) = self.memory.load() else {
            return false;
        };

        self.browse.set_query(query.as_str());
        self.browse.submit_search(&query).await;
        true
    }

    pub fn gateway(&self) -> &Arc<dyn CatalogGateway> {
        &self.gateway
    }

    pub fn favorites(&self) -> &Arc<FavoritesStore> {
        &self.favorites
    }

    pub fn browse(&self) -> &Arc<BrowseMachine> {
        &self.browse
    }

    pub fn search_memory(&self) -> &SearchMemory {
        &self.memory
    }

    pub async fn movie_view(&self, id: MovieId) -> catalog::Result<MovieView> {
        MovieView::load(self.gateway.as_ref(), id).await
    }
}
