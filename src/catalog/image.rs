use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown wherever the service has no artwork for an item
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/500x750?text=No+Image+Available";

/// Image size tokens understood by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Profile pictures and small cards
    Thumbnail,
    /// Posters in grids
    #[default]
    Standard,
    Large,
    /// Full-size backdrops
    Original,
}

impl ImageSize {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Thumbnail => "w185",
            Self::Standard => "w500",
            Self::Large => "w780",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Build an image URL from a path returned by the API.
///
/// Never fails: a missing or empty path yields [`PLACEHOLDER_IMAGE_URL`].
pub fn image_url(base: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}{}", base.trim_end_matches('/'), size, p),
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn test_image_url_with_path() {
        assert_eq!(
            image_url(BASE, Some("/qmDpIHrmpJINaRKAfWQfftjCdyi.jpg"), ImageSize::Standard),
            "https://image.tmdb.org/t/p/w500/qmDpIHrmpJINaRKAfWQfftjCdyi.jpg"
        );
        assert_eq!(
            image_url(BASE, Some("/backdrop.jpg"), ImageSize::Original),
            "https://image.tmdb.org/t/p/original/backdrop.jpg"
        );
    }

    #[test]
    fn test_image_url_placeholder() {
        assert_eq!(image_url(BASE, None, ImageSize::Thumbnail), PLACEHOLDER_IMAGE_URL);
        assert_eq!(image_url(BASE, Some(""), ImageSize::Large), PLACEHOLDER_IMAGE_URL);
    }
}
