mod cache;
mod http;
mod image;
mod tmdb;
mod traits;
mod types;

pub use cache::{CacheConfig, GenreCache};
pub use http::HttpClient;
pub use image::{ImageSize, PLACEHOLDER_IMAGE_URL, image_url};
pub use tmdb::TmdbGateway;
pub use traits::CatalogGateway;
pub use types::{
    CastMember, Credits, CrewMember, Genre, GenreId, Movie, MovieDetails, MovieId, SearchResults,
    Video,
};

use crate::config::CatalogConfig;
use std::sync::Arc;

/// Catalog result type
pub type Result<T> = std::result::Result<T, ServiceError>;

/// A failed call against the remote catalog service
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Build the TMDB gateway described by the catalog configuration
pub fn create_default_gateway(config: &CatalogConfig) -> Result<Arc<dyn CatalogGateway>> {
    Ok(Arc::new(TmdbGateway::from_config(config)?))
}
