use crate::catalog::types::{
    CastMember, Credits, CrewMember, Genre, Movie, MovieDetails, SearchResults, Video,
};
use serde::Deserialize;

// Listing responses
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub results: Vec<MovieResult>,
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub genre_ids: Option<Vec<i64>>,
}

// Detail responses
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub id: i64,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreResult>,
    pub videos: Option<VideoList>,
}

#[derive(Debug, Deserialize)]
pub struct VideoList {
    pub results: Vec<VideoResult>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub site: String,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreResult {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<GenreResult>,
}

#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastResult>,
    #[serde(default)]
    pub crew: Vec<CrewResult>,
}

#[derive(Debug, Deserialize)]
pub struct CastResult {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrewResult {
    pub id: i64,
    pub name: String,
    pub job: Option<String>,
}

/// TMDB sends "" for unknown dates and paths on some records
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<MovieResult> for Movie {
    fn from(m: MovieResult) -> Self {
        Self {
            id: m.id,
            title: m.title,
            overview: m.overview.unwrap_or_default(),
            poster_path: non_empty(m.poster_path),
            backdrop_path: non_empty(m.backdrop_path),
            release_date: non_empty(m.release_date),
            vote_average: m.vote_average.unwrap_or_default(),
            genre_ids: m.genre_ids.unwrap_or_default(),
        }
    }
}

impl From<PageResponse> for SearchResults {
    fn from(page: PageResponse) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
            results: page.results.into_iter().map(Movie::from).collect(),
        }
    }
}

impl From<GenreResult> for Genre {
    fn from(g: GenreResult) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

impl From<DetailsResponse> for MovieDetails {
    fn from(d: DetailsResponse) -> Self {
        Self {
            id: d.id,
            title: d.title,
            overview: d.overview.unwrap_or_default(),
            poster_path: non_empty(d.poster_path),
            backdrop_path: non_empty(d.backdrop_path),
            release_date: non_empty(d.release_date),
            vote_average: d.vote_average.unwrap_or_default(),
            genres: d.genres.into_iter().map(Genre::from).collect(),
            runtime: d.runtime.unwrap_or_default(),
            budget: d.budget.unwrap_or_default(),
            revenue: d.revenue.unwrap_or_default(),
            tagline: non_empty(d.tagline),
            status: d.status.unwrap_or_default(),
            videos: d
                .videos
                .map(|v| v.results)
                .unwrap_or_default()
                .into_iter()
                .map(|v| Video {
                    kind: v.kind,
                    site: v.site,
                    key: v.key,
                    name: v.name,
                })
                .collect(),
        }
    }
}

impl From<CreditsResponse> for Credits {
    fn from(c: CreditsResponse) -> Self {
        Self {
            cast: c
                .cast
                .into_iter()
                .map(|m| CastMember {
                    id: m.id,
                    name: m.name,
                    character: m.character.unwrap_or_default(),
                    profile_path: non_empty(m.profile_path),
                })
                .collect(),
            crew: c
                .crew
                .into_iter()
                .map(|m| CrewMember {
                    id: m.id,
                    name: m.name,
                    job: m.job.unwrap_or_default(),
                })
                .collect(),
        }
    }
}
