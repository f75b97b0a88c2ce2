use super::api_types::{CreditsResponse, DetailsResponse, GenreListResponse, PageResponse};
use crate::catalog::{
    CacheConfig, GenreCache, HttpClient, Result, ServiceError,
    image::{self, ImageSize},
    traits::CatalogGateway,
    types::{Credits, Genre, GenreId, MovieDetails, MovieId, SearchResults},
};
use crate::config::CatalogConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

pub struct TmdbGateway {
    client: HttpClient,
    api_key: String,
    language: String,
    image_base: String,
    genres: GenreCache,
}

impl TmdbGateway {
    /// Gateway against the public TMDB endpoints with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&CatalogConfig {
            api_key: api_key.into(),
            ..CatalogConfig::default()
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ServiceError::Config(
                "TMDB API key cannot be empty".to_string(),
            ));
        }

        let genres = GenreCache::with_config(CacheConfig {
            genre_ttl: Duration::from_secs(config.genre_cache_ttl_secs),
            ..CacheConfig::default()
        });

        Ok(Self {
            client: HttpClient::new(&config.base_url, Duration::from_secs(config.timeout_secs))?,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            image_base: config.image_base_url.clone(),
            genres,
        })
    }

    /// Every request carries the API key and the configured language
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        params.extend_from_slice(extra_params);

        self.client.get_with_params(endpoint, &params).await
    }

    async fn listing(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<SearchResults> {
        let page: PageResponse = self.request(endpoint, params).await?;
        Ok(page.into())
    }
}

#[async_trait]
impl CatalogGateway for TmdbGateway {
    async fn fetch_trending(&self) -> Result<SearchResults> {
        debug!("Fetching trending movies");
        self.listing("/trending/movie/week", &[])
            .await
            .inspect_err(|e| warn!("Error fetching trending movies: {}", e))
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchResults> {
        debug!(query = %query, page, "Searching movies");
        let page = page.to_string();

        self.listing(
            "/search/movie",
            &[("query", query), ("page", page.as_str()), ("include_adult", "false")],
        )
        .await
        .inspect_err(|e| warn!("Error searching movies: {}", e))
    }

    async fn get_details(&self, id: MovieId) -> Result<MovieDetails> {
        let endpoint = format!("/movie/{id}");
        let details: DetailsResponse = self
            .request(&endpoint, &[("append_to_response", "videos")])
            .await
            .inspect_err(|e| warn!("Error fetching movie details for {}: {}", id, e))?;

        Ok(details.into())
    }

    async fn get_credits(&self, id: MovieId) -> Result<Credits> {
        let endpoint = format!("/movie/{id}/credits");
        let credits: CreditsResponse = self
            .request(&endpoint, &[])
            .await
            .inspect_err(|e| warn!("Error fetching movie credits for {}: {}", id, e))?;

        Ok(credits.into())
    }

    async fn get_genres(&self) -> Result<Vec<Genre>> {
        if let Some(cached) = self.genres.get(&self.language).await {
            debug!("Cache hit for genres: {}", self.language);
            return Ok(cached);
        }

        let response: GenreListResponse = self
            .request("/genre/movie/list", &[])
            .await
            .inspect_err(|e| warn!("Error fetching genres: {}", e))?;

        let genres: Vec<Genre> = response.genres.into_iter().map(Genre::from).collect();
        self.genres.set(&self.language, genres.clone()).await;

        Ok(genres)
    }

    async fn discover_by_genre(&self, genre: GenreId, page: u32) -> Result<SearchResults> {
        let genre_param = genre.to_string();
        let page = page.to_string();

        self.listing(
            "/discover/movie",
            &[
                ("with_genres", genre_param.as_str()),
                ("page", page.as_str()),
                ("sort_by", "popularity.desc"),
            ],
        )
        .await
        .inspect_err(|e| warn!("Error fetching movies for genre {}: {}", genre, e))
    }

    fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        image::image_url(&self.image_base, path, size)
    }
}
