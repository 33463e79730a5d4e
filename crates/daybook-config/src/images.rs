//! Random image service configuration (Unsplash-compatible).

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    String::from("https://api.unsplash.com/photos/random")
}

fn default_categories() -> Vec<String> {
    [
        "abstract",
        "pattern",
        "minimal",
        "nature",
        "history",
        "art",
        "technology",
        "food",
        "workspace",
        "ocean",
        "architecture",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Unsplash access key, sent as `client_id`.
    #[serde(default)]
    pub access_key: String,

    /// Search queries rotated through on each request.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            access_key: String::new(),
            categories: default_categories(),
        }
    }
}

impl ImagesConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.access_key.is_empty() && !self.url.is_empty()
    }
}
