use super::state::{BrowseState, OperationKind, OperationStatus};
use crate::catalog::{CatalogGateway, GenreId, SearchResults};
use crate::session::SearchMemory;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const TRENDING_FAILED: &str = "Failed to fetch trending movies. Please try again later.";
pub const SEARCH_FAILED: &str = "Failed to search movies. Please try again later.";
pub const LOAD_MORE_FAILED: &str = "Failed to load more results. Please try again later.";

/// Identifies the request a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestToken {
    kind: OperationKind,
    generation: u64,
}

struct Inner {
    state: BrowseState,
    /// Bumped by every search submission; search and load-more responses
    /// from an older generation are discarded.
    search_generation: u64,
    trending_generation: u64,
}

impl Inner {
    fn is_current(&self, token: RequestToken) -> bool {
        let generation = match token.kind {
            OperationKind::Trending => self.trending_generation,
            OperationKind::Search | OperationKind::LoadMore => self.search_generation,
        };
        generation == token.generation
    }

    fn fail(&mut self, kind: OperationKind, message: &str) {
        self.state.statuses.set(kind, OperationStatus::Failed);
        self.state.error = Some(message.to_string());
    }
}

/// Trending, search and pagination state.
///
/// State changes happen under a lock that is never held across a gateway
/// call, so independent operations proceed concurrently.
pub struct BrowseMachine {
    gateway: Arc<dyn CatalogGateway>,
    memory: SearchMemory,
    inner: Mutex<Inner>,
}

impl BrowseMachine {
    pub fn new(gateway: Arc<dyn CatalogGateway>, memory: SearchMemory) -> Self {
        Self {
            gateway,
            memory,
            inner: Mutex::new(Inner {
                state: BrowseState::default(),
                search_generation: 0,
                trending_generation: 0,
            }),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> BrowseState {
        self.inner.lock().state.clone()
    }

    /// Startup sequence: load trending and replay the remembered search, if any.
    pub async fn start(&self) {
        let replay = self.memory.load();
        if let Some(query) = &replay {
            info!("Replaying last search {:?}", query);
            self.inner.lock().state.last_search = query.clone();
        }

        let replay_search = async {
            if let Some(query) = replay {
                self.submit_search(&query).await;
            }
        };

        tokio::join!(self.load_trending(), replay_search);
    }

    pub async fn load_trending(&self) {
        let token = {
            let mut inner = self.inner.lock();
            inner.trending_generation += 1;
            inner
                .state
                .statuses
                .set(OperationKind::Trending, OperationStatus::Pending);
            RequestToken {
                kind: OperationKind::Trending,
                generation: inner.trending_generation,
            }
        };

        let outcome = self.gateway.fetch_trending().await;

        let mut inner = self.inner.lock();
        if !inner.is_current(token) {
            debug!("Discarding stale trending response");
            return;
        }

        match outcome {
            Ok(page) => {
                debug!("Loaded {} trending movies", page.results.len());
                inner.state.trending = page.results;
                inner
                    .state
                    .statuses
                    .set(OperationKind::Trending, OperationStatus::Succeeded);
            }
            Err(e) => {
                error!("Trending load failed: {}", e);
                inner.fail(OperationKind::Trending, TRENDING_FAILED);
            }
        }
    }

    /// Record the search box text without dispatching anything
    pub fn set_query(&self, query: impl Into<String>) {
        self.inner.lock().state.query = query.into();
    }

    /// Run a new search from page 1.
    ///
    /// A blank query clears the shown results without a network call. Either
    /// way, any search or load-more still in flight is superseded.
    pub async fn submit_search(&self, query: &str) {
        let query = query.trim();

        let token = {
            let mut inner = self.inner.lock();
            inner.search_generation += 1;
            inner
                .state
                .statuses
                .set(OperationKind::LoadMore, OperationStatus::Idle);

            if query.is_empty() {
                debug!("Blank query, clearing search results");
                inner.state.search_results = None;
                inner
                    .state
                    .statuses
                    .set(OperationKind::Search, OperationStatus::Idle);
                return;
            }

            inner
                .state
                .statuses
                .set(OperationKind::Search, OperationStatus::Pending);
            inner.state.error = None;
            RequestToken {
                kind: OperationKind::Search,
                generation: inner.search_generation,
            }
        };

        let outcome = self.gateway.search(query, 1).await;

        {
            let mut inner = self.inner.lock();
            if !inner.is_current(token) {
                debug!("Discarding stale search response for {:?}", query);
                return;
            }

            match outcome {
                Ok(results) => {
                    info!(
                        "Search {:?}: {} results over {} pages",
                        query, results.total_results, results.total_pages
                    );
                    inner.state.search_results = Some(results);
                    inner.state.last_search = query.to_string();
                    inner.state.error = None;
                    inner
                        .state
                        .statuses
                        .set(OperationKind::Search, OperationStatus::Succeeded);
                }
                Err(e) => {
                    error!("Search {:?} failed: {}", query, e);
                    inner.fail(OperationKind::Search, SEARCH_FAILED);
                    return;
                }
            }
        }

        self.memory.remember(query);
    }

    /// Fetch the page after the last one shown and append it.
    ///
    /// No-op while a search or another load-more is pending, or when the last
    /// page is already shown. The page counter only advances on success, so a
    /// retry after a failure requests the same page again.
    pub async fn load_more(&self) {
        let (token, query, next_page) = {
            let mut inner = self.inner.lock();
            if !inner.state.can_load_more() {
                debug!("Nothing more to load");
                return;
            }
            let Some(next_page) = inner
                .state
                .search_results
                .as_ref()
                .and_then(SearchResults::next_page)
            else {
                return;
            };

            inner
                .state
                .statuses
                .set(OperationKind::LoadMore, OperationStatus::Pending);
            let token = RequestToken {
                kind: OperationKind::LoadMore,
                generation: inner.search_generation,
            };
            (token, inner.state.last_search.clone(), next_page)
        };

        let outcome = self.gateway.search(&query, next_page).await;

        let mut inner = self.inner.lock();
        if !inner.is_current(token) {
            debug!("Discarding stale page {} for {:?}", next_page, query);
            return;
        }

        match outcome {
            Ok(page) => {
                let Some(results) = inner.state.search_results.as_mut() else {
                    warn!("Search results vanished while loading page {}", next_page);
                    return;
                };
                results.append(page);
                debug!(
                    "Loaded page {} of {:?}, {} results shown",
                    results.page,
                    query,
                    results.results.len()
                );
                inner.state.error = None;
                inner
                    .state
                    .statuses
                    .set(OperationKind::LoadMore, OperationStatus::Succeeded);
            }
            Err(e) => {
                error!("Loading page {} of {:?} failed: {}", next_page, query, e);
                inner.fail(OperationKind::LoadMore, LOAD_MORE_FAILED);
            }
        }
    }

    /// Fetch the genre list for the filter bar. Failures are only logged.
    pub async fn load_genres(&self) {
        match self.gateway.get_genres().await {
            Ok(genres) => {
                debug!("Loaded {} genres", genres.len());
                self.inner.lock().state.genres = genres;
            }
            Err(e) => warn!("Error loading genres: {}", e),
        }
    }

    /// Select a trending genre filter; selecting the active one clears it.
    pub fn select_genre(&self, genre: GenreId) {
        let mut inner = self.inner.lock();
        inner.state.selected_genre = if inner.state.selected_genre == Some(genre) {
            None
        } else {
            Some(genre)
        };
    }

    /// Drop interest in every in-flight request, e.g. when leaving the screen.
    /// Late responses are discarded and pending statuses return to idle.
    pub fn invalidate_pending(&self) {
        let mut inner = self.inner.lock();
        inner.search_generation += 1;
        inner.trending_generation += 1;

        let statuses = &mut inner.state.statuses;
        for kind in [
            OperationKind::Trending,
            OperationKind::Search,
            OperationKind::LoadMore,
        ] {
            if statuses.is_pending(kind) {
                statuses.set(kind, OperationStatus::Idle);
            }
        }
    }
}
