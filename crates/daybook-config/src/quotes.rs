//! Quote-of-the-day service configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    String::from("https://zenquotes.io/api/today")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotesConfig {
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
