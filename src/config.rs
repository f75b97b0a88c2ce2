use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote catalog service
    pub catalog: CatalogConfig,

    /// Local preference storage
    pub storage: StorageConfig,

    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TMDB API key (required)
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Image CDN base URL
    pub image_base_url: String,

    /// Language sent with every request
    pub language: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// How long the genre list stays cached (seconds)
    pub genre_cache_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 30,
            genre_cache_ttl_secs: 86400,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding persisted records. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved storage directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("cinefind"))
                .unwrap_or_else(|| PathBuf::from(".cinefind"))
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when RUST_LOG is not set
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Also write daily-rolling log files here
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// Without an explicit path, `cinefind.toml` in the working directory is read
    /// if present. Environment variables use the `CINEFIND__` prefix with `__`
    /// between sections, e.g. `CINEFIND__CATALOG__API_KEY`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("cinefind").required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("CINEFIND")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
