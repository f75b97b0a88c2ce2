//! The user's saved movies.
//!
//! The set is keyed by movie id and keeps insertion order for display. Every
//! mutation rewrites the whole record; write failures are logged and never
//! surface to the caller.

use crate::catalog::{Movie, MovieId};
use crate::storage::{FAVORITES_KEY, KeyValueStore};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    movies: RwLock<Vec<Movie>>,
}

impl FavoritesStore {
    /// Rehydrate from durable storage. Missing or malformed records yield an empty set.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let movies = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Movie>>(&raw) {
                Ok(movies) => dedup_by_id(movies),
                Err(e) => {
                    warn!("Error parsing favorites record, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error reading favorites record, starting empty: {}", e);
                Vec::new()
            }
        };

        info!("Loaded {} favorites", movies.len());

        Self {
            store,
            movies: RwLock::new(movies),
        }
    }

    /// Insert if absent. Returns whether the movie was inserted.
    pub fn add(&self, movie: Movie) -> bool {
        let mut movies = self.movies.write();
        if movies.iter().any(|m| m.id == movie.id) {
            return false;
        }

        debug!("Adding favorite {} ({})", movie.id, movie.title);
        movies.push(movie);
        self.persist(&movies);
        true
    }

    /// Remove if present. Returns whether anything was removed.
    pub fn remove(&self, id: MovieId) -> bool {
        let mut movies = self.movies.write();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        if movies.len() == before {
            return false;
        }

        debug!("Removed favorite {}", id);
        self.persist(&movies);
        true
    }

    /// Flip membership. Returns whether the movie is a favorite afterwards.
    pub fn toggle(&self, movie: Movie) -> bool {
        if self.remove(movie.id) {
            false
        } else {
            self.add(movie)
        }
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.movies.read().iter().any(|m| m.id == id)
    }

    /// Favorites in insertion order
    pub fn list(&self) -> Vec<Movie> {
        self.movies.read().clone()
    }

    pub fn len(&self) -> usize {
        self.movies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.read().is_empty()
    }

    /// Filtered and sorted favorites for display
    pub fn view(&self, query: &FavoritesQuery) -> Vec<Movie> {
        let needle = query.search_term.trim().to_lowercase();
        let mut movies: Vec<Movie> = self
            .movies
            .read()
            .iter()
            .filter(|m| needle.is_empty() || m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        movies.sort_by(|a, b| query.sort.compare(a, b));
        movies
    }

    fn persist(&self, movies: &[Movie]) {
        let result = serde_json::to_string(movies)
            .map_err(crate::storage::StorageError::from)
            .and_then(|json| self.store.set(FAVORITES_KEY, &json));

        if let Err(e) = result {
            warn!("Failed to persist favorites: {}", e);
        }
    }
}

/// First occurrence of each id wins
fn dedup_by_id(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::new();
    movies.into_iter().filter(|m| seen.insert(m.id)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Title,
    ReleaseDate,
    Rating,
}

impl SortOption {
    /// Titles read naturally A-Z; dates and ratings are most useful newest/highest first
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Title => SortDirection::Ascending,
            Self::ReleaseDate | Self::Rating => SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub option: SortOption,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(option: SortOption, direction: SortDirection) -> Self {
        Self { option, direction }
    }

    /// Selecting the active option flips the direction; a new option starts
    /// from its default direction.
    pub fn select(&mut self, option: SortOption) {
        if option == self.option {
            self.direction = self.direction.reversed();
        } else {
            self.option = option;
            self.direction = option.default_direction();
        }
    }

    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        let ordering = match self.option {
            SortOption::Title => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title)),
            // Undated movies sort as the oldest
            SortOption::ReleaseDate => a.released_on().cmp(&b.released_on()),
            SortOption::Rating => a.vote_average.total_cmp(&b.vote_average),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Display options for the favorites list
#[derive(Debug, Clone, Default)]
pub struct FavoritesQuery {
    /// Case-insensitive title substring
    pub search_term: String,
    pub sort: SortState,
}

impl FavoritesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }
}
