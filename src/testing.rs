//! Scripted catalog double for state-layer tests.

use crate::catalog::{
    CatalogGateway, Credits, Genre, GenreId, ImageSize, Movie, MovieDetails, MovieId, Result,
    SearchResults, ServiceError, image_url,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Trending,
    Search { query: String, page: u32 },
    Details(MovieId),
    Credits(MovieId),
    Genres,
    Discover { genre: GenreId, page: u32 },
}

impl GatewayCall {
    pub fn search(query: &str, page: u32) -> Self {
        Self::Search {
            query: query.to_string(),
            page,
        }
    }
}

type SearchKey = (String, u32);

/// `None` entries script a failure
#[derive(Default)]
pub struct ScriptedGateway {
    calls: Mutex<Vec<GatewayCall>>,
    trending: Mutex<VecDeque<Option<SearchResults>>>,
    searches: Mutex<HashMap<SearchKey, VecDeque<Option<SearchResults>>>>,
    details: Mutex<HashMap<MovieId, MovieDetails>>,
    credits: Mutex<HashMap<MovieId, Credits>>,
    genres: Mutex<Option<Vec<Genre>>>,
    search_holds: Mutex<HashMap<SearchKey, Arc<Notify>>>,
    trending_hold: Mutex<Option<Arc<Notify>>>,
}

/// Take the next scripted response; the last one keeps repeating
fn next_scripted(queue: &mut VecDeque<Option<SearchResults>>) -> Option<Option<SearchResults>> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

fn scripted_failure() -> ServiceError {
    ServiceError::Api {
        status: 503,
        message: "scripted failure".to_string(),
    }
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trending_returns(self, results: SearchResults) -> Self {
        self.trending.lock().push_back(Some(results));
        self
    }

    pub fn trending_fails(self) -> Self {
        self.trending.lock().push_back(None);
        self
    }

    pub fn search_returns(self, query: &str, page: u32, results: SearchResults) -> Self {
        self.script_search(query, page, Some(results));
        self
    }

    pub fn search_fails(self, query: &str, page: u32) -> Self {
        self.script_search(query, page, None);
        self
    }

    pub fn with_details(self, details: MovieDetails) -> Self {
        self.details.lock().insert(details.id, details);
        self
    }

    pub fn with_credits(self, id: MovieId, credits: Credits) -> Self {
        self.credits.lock().insert(id, credits);
        self
    }

    pub fn with_genres(self, genres: Vec<Genre>) -> Self {
        *self.genres.lock() = Some(genres);
        self
    }

    fn script_search(&self, query: &str, page: u32, outcome: Option<SearchResults>) {
        self.searches
            .lock()
            .entry((query.to_string(), page))
            .or_default()
            .push_back(outcome);
    }

    /// Hold responses for this search until the returned handle is notified
    pub fn hold_search(&self, query: &str, page: u32) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.search_holds
            .lock()
            .insert((query.to_string(), page), notify.clone());
        notify
    }

    pub fn hold_trending(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.trending_hold.lock() = Some(notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().clone()
    }

    pub fn search_calls(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, GatewayCall::Search { .. }))
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl CatalogGateway for ScriptedGateway {
    async fn fetch_trending(&self) -> Result<SearchResults> {
        self.record(GatewayCall::Trending);

        let hold = self.trending_hold.lock().take();
        if let Some(hold) = hold {
            hold.notified().await;
        }

        next_scripted(&mut self.trending.lock())
            .flatten()
            .ok_or_else(scripted_failure)
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchResults> {
        self.record(GatewayCall::search(query, page));
        let key = (query.to_string(), page);

        let hold = self.search_holds.lock().remove(&key);
        if let Some(hold) = hold {
            hold.notified().await;
        }

        let scripted = self.searches.lock().get_mut(&key).and_then(next_scripted);
        match scripted {
            Some(Some(results)) => Ok(results),
            Some(None) => Err(scripted_failure()),
            None => Err(ServiceError::NotFound(format!("search {query:?} page {page}"))),
        }
    }

    async fn get_details(&self, id: MovieId) -> Result<MovieDetails> {
        self.record(GatewayCall::Details(id));
        self.details
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("/movie/{id}")))
    }

    async fn get_credits(&self, id: MovieId) -> Result<Credits> {
        self.record(GatewayCall::Credits(id));
        self.credits
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("/movie/{id}/credits")))
    }

    async fn get_genres(&self) -> Result<Vec<Genre>> {
        self.record(GatewayCall::Genres);
        self.genres.lock().clone().ok_or_else(scripted_failure)
    }

    async fn discover_by_genre(&self, genre: GenreId, page: u32) -> Result<SearchResults> {
        self.record(GatewayCall::Discover { genre, page });
        Err(scripted_failure())
    }

    fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        image_url("https://image.tmdb.org/t/p", path, size)
    }
}

/// A page of numbered movies with ids from `ids`
pub fn results_page(page: u32, total_pages: u32, total_results: u32, ids: Range<i64>) -> SearchResults {
    SearchResults {
        page,
        total_pages,
        total_results,
        results: ids.map(|id| Movie::new(id, format!("Movie {id}"))).collect(),
    }
}

pub fn inception() -> Movie {
    Movie::new(27205, "Inception")
        .with_release_date("2010-07-15")
        .with_rating(8.4)
        .with_genres(vec![28, 878, 12])
}
