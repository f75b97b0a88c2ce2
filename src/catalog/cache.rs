use crate::catalog::types::Genre;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Session cache for the genre reference list, keyed by language
#[derive(Clone)]
pub struct GenreCache {
    genres: Cache<String, Arc<Vec<Genre>>>,
}

impl GenreCache {
    /// Create a new cache with default settings
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a new cache with custom configuration
    pub fn with_config(config: CacheConfig) -> Self {
        let genres = Cache::builder()
            .max_capacity(config.max_languages)
            .time_to_live(config.genre_ttl)
            .build();

        Self { genres }
    }

    /// Get cached genres
    pub async fn get(&self, language: &str) -> Option<Vec<Genre>> {
        self.genres
            .get(&language.to_lowercase())
            .await
            .map(|arc| (*arc).clone())
    }

    /// Cache genres
    pub async fn set(&self, language: &str, genres: Vec<Genre>) {
        self.genres
            .insert(language.to_lowercase(), Arc::new(genres))
            .await;
    }

    pub fn clear(&self) {
        self.genres.invalidate_all();
    }
}

impl Default for GenreCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of languages held at once
    pub max_languages: u64,
    /// TTL for the genre list
    pub genre_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_languages: 8,
            genre_ttl: Duration::from_secs(86400), // 24 hours
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: 28,
                name: "Action".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_cache_genres() {
        let cache = GenreCache::new();

        // Cache miss
        assert!(cache.get("en-US").await.is_none());

        cache.set("en-US", genres()).await;

        // Cache hit, language key is case-insensitive
        let cached = cache.get("en-us").await;
        assert_eq!(cached.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = GenreCache::new();
        cache.set("en-US", genres()).await;

        cache.clear();

        assert!(cache.get("en-US").await.is_none());
    }
}
