use crate::catalog::{
    Result,
    image::ImageSize,
    types::{Credits, Genre, GenreId, MovieDetails, MovieId, SearchResults},
};
use async_trait::async_trait;

/// The only seam through which the client talks to the movie catalog.
///
/// Implementations are stateless apart from reference-data caching and never
/// retry: a failed call surfaces immediately as a [`ServiceError`](crate::catalog::ServiceError).
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// This week's trending movies, first page
    async fn fetch_trending(&self) -> Result<SearchResults>;

    /// Search movies by title. The query is passed through as-is.
    async fn search(&self, query: &str, page: u32) -> Result<SearchResults>;

    /// Movie details with embedded videos
    async fn get_details(&self, id: MovieId) -> Result<MovieDetails>;

    async fn get_credits(&self, id: MovieId) -> Result<Credits>;

    /// Genre reference list
    async fn get_genres(&self) -> Result<Vec<Genre>>;

    /// Most popular movies tagged with a genre
    async fn discover_by_genre(&self, genre: GenreId, page: u32) -> Result<SearchResults>;

    /// Resolve an image path to a URL. Pure and total.
    fn image_url(&self, path: Option<&str>, size: ImageSize) -> String;
}
