use crate::catalog::{Genre, GenreId, Movie, SearchResults};
use serde::Serialize;
use std::fmt;

/// Operations tracked independently by the browse machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Trending,
    Search,
    LoadMore,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trending => write!(f, "trending"),
            Self::Search => write!(f, "search"),
            Self::LoadMore => write!(f, "load_more"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Status per operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OperationStatuses {
    pub trending: OperationStatus,
    pub search: OperationStatus,
    pub load_more: OperationStatus,
}

impl OperationStatuses {
    pub fn get(&self, kind: OperationKind) -> OperationStatus {
        match kind {
            OperationKind::Trending => self.trending,
            OperationKind::Search => self.search,
            OperationKind::LoadMore => self.load_more,
        }
    }

    pub fn set(&mut self, kind: OperationKind, status: OperationStatus) {
        match kind {
            OperationKind::Trending => self.trending = status,
            OperationKind::Search => self.search = status,
            OperationKind::LoadMore => self.load_more = status,
        }
    }

    pub fn is_pending(&self, kind: OperationKind) -> bool {
        self.get(kind) == OperationStatus::Pending
    }

    pub fn any_pending(&self) -> bool {
        [self.trending, self.search, self.load_more].contains(&OperationStatus::Pending)
    }
}

/// Snapshot of everything the browse screens render
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowseState {
    pub trending: Vec<Movie>,
    /// Accumulated pages of the current search, absent when no search is shown
    pub search_results: Option<SearchResults>,
    /// Text currently in the search box
    pub query: String,
    /// Most recent successfully dispatched query
    pub last_search: String,
    /// User-facing message for the most recent failure
    pub error: Option<String>,
    pub statuses: OperationStatuses,
    pub genres: Vec<Genre>,
    pub selected_genre: Option<GenreId>,
}

impl BrowseState {
    pub fn status(&self, kind: OperationKind) -> OperationStatus {
        self.statuses.get(kind)
    }

    /// Whether any spinner should be showing
    pub fn is_loading(&self) -> bool {
        self.statuses.any_pending()
    }

    /// Whether another page can be requested right now
    pub fn can_load_more(&self) -> bool {
        !self.statuses.is_pending(OperationKind::Search)
            && !self.statuses.is_pending(OperationKind::LoadMore)
            && self
                .search_results
                .as_ref()
                .is_some_and(SearchResults::has_more)
    }

    /// Trending movies narrowed to the selected genre
    pub fn filtered_trending(&self) -> Vec<&Movie> {
        match self.selected_genre {
            Some(genre) => self.trending.iter().filter(|m| m.has_genre(genre)).collect(),
            None => self.trending.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses_are_independent() {
        let mut statuses = OperationStatuses::default();
        statuses.set(OperationKind::Trending, OperationStatus::Pending);
        statuses.set(OperationKind::Search, OperationStatus::Succeeded);

        assert!(statuses.is_pending(OperationKind::Trending));
        assert!(!statuses.is_pending(OperationKind::Search));
        assert_eq!(statuses.get(OperationKind::LoadMore), OperationStatus::Idle);
        assert!(statuses.any_pending());
    }

    #[test]
    fn test_filtered_trending() {
        let state = BrowseState {
            trending: vec![
                Movie::new(1, "Action Flick").with_genres(vec![28]),
                Movie::new(2, "Drama Piece").with_genres(vec![18]),
                Movie::new(3, "Action Drama").with_genres(vec![18, 28]),
            ],
            selected_genre: Some(28),
            ..Default::default()
        };

        let ids: Vec<_> = state.filtered_trending().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_can_load_more_requires_results() {
        let mut state = BrowseState::default();
        assert!(!state.can_load_more());

        state.search_results = Some(SearchResults {
            page: 1,
            total_pages: 2,
            total_results: 21,
            results: Vec::new(),
        });
        assert!(state.can_load_more());

        state.statuses.set(OperationKind::Search, OperationStatus::Pending);
        assert!(!state.can_load_more());
    }
}
