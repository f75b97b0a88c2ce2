use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type MovieId = i64;
pub type GenreId = i64;

/// Movie summary as returned by trending, search and discover listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD)
    pub release_date: Option<String>,
    /// Average rating (0-10 scale)
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

impl Movie {
    /// Create a movie with only the required fields set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
            genre_ids: Vec::new(),
        }
    }

    /// Builder pattern: set release date
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    /// Builder pattern: set rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.vote_average = rating;
        self
    }

    /// Builder pattern: set genre ids
    pub fn with_genres(mut self, genre_ids: Vec<GenreId>) -> Self {
        self.genre_ids = genre_ids;
        self
    }

    /// Parsed release date, if present and well-formed
    pub fn released_on(&self) -> Option<NaiveDate> {
        parse_date(self.release_date.as_deref())
    }

    pub fn year(&self) -> Option<i32> {
        self.released_on().map(|d| d.year())
    }

    pub fn has_genre(&self, genre: GenreId) -> bool {
        self.genre_ids.contains(&genre)
    }
}

/// Genre reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Video attached to a movie (trailers, teasers, featurettes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "type")]
    pub kind: String,
    pub site: String,
    pub key: String,
    pub name: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }

    /// Watch URL for videos hosted on YouTube
    pub fn watch_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

/// Full details for a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub genres: Vec<Genre>,
    /// Runtime in minutes, 0 when unknown
    pub runtime: u32,
    /// 0 when undisclosed
    pub budget: u64,
    /// 0 when undisclosed
    pub revenue: u64,
    pub tagline: Option<String>,
    pub status: String,
    pub videos: Vec<Video>,
}

impl MovieDetails {
    /// Summary view of these details, suitable for the favorites list
    pub fn summary(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.clone(),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }

    pub fn released_on(&self) -> Option<NaiveDate> {
        parse_date(self.release_date.as_deref())
    }

    /// First YouTube trailer, in the order the service lists videos
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|v| v.is_youtube_trailer())
    }
}

/// One page of movie listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// 1-based page number
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<Movie>,
}

impl SearchResults {
    /// Whether the service reports further pages after this one
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then_some(self.page + 1)
    }

    /// Accumulate a later page: results are appended after the existing ones,
    /// page and totals are taken from the newer page.
    pub fn append(&mut self, next: SearchResults) {
        self.page = next.page;
        self.total_pages = next.total_pages;
        self.total_results = next.total_results;
        self.results.extend(next.results);
    }
}

fn parse_date(date: Option<&str>) -> Option<NaiveDate> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}
