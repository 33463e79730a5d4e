//! Decorative read-only integrations: quote of the day and a random image.
//!
//! Neither call carries the session token. Failures are reported like any
//! other [`ApiError`] and never affect the session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{read_json, with_query};

fn http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("daybook/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ApiError::from_transport)
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// `[{"q": "...", "a": "..."}]`
#[derive(Deserialize)]
struct ZenQuote {
    q: String,
    #[serde(default)]
    a: String,
}

#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    url: String,
}

impl QuoteClient {
    /// # Errors
    ///
    /// [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(timeout)?,
            url: url.to_string(),
        })
    }

    /// # Errors
    ///
    /// Transport and status errors, or [`ApiError::NotFound`] when the
    /// service returns an empty list.
    pub async fn today(&self) -> Result<Quote, ApiError> {
        tracing::debug!(url = %self.url, "fetching quote");
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let quotes: Vec<ZenQuote> = read_json(resp).await?;
        quotes
            .into_iter()
            .next()
            .map(|quote| Quote {
                text: quote.q,
                author: quote.a,
            })
            .ok_or_else(|| ApiError::NotFound("no quote today".into()))
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Round-robin over search categories.
#[derive(Debug, Clone)]
pub struct CategoryCycle {
    categories: Vec<String>,
    next: usize,
}

impl CategoryCycle {
    #[must_use]
    pub const fn new(categories: Vec<String>) -> Self {
        Self { categories, next: 0 }
    }

    /// Start the rotation at `offset` (wrapped to the list length).
    #[must_use]
    pub fn starting_at(mut self, offset: usize) -> Self {
        if !self.categories.is_empty() {
            self.next = offset % self.categories.len();
        }
        self
    }

    /// The current category; advances the cycle. `None` for an empty list.
    pub fn advance(&mut self) -> Option<&str> {
        if self.categories.is_empty() {
            return None;
        }
        let index = self.next;
        self.next = (index + 1) % self.categories.len();
        self.categories.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomImage {
    pub url: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    alt_description: Option<String>,
    #[serde(default)]
    user: Option<UnsplashUser>,
}

#[derive(Deserialize)]
struct UnsplashUrls {
    full: String,
}

#[derive(Deserialize)]
struct UnsplashUser {
    name: String,
}

#[derive(Debug, Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    url: String,
    access_key: String,
}

impl ImageClient {
    /// # Errors
    ///
    /// [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(url: &str, access_key: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(timeout)?,
            url: url.to_string(),
            access_key: access_key.to_string(),
        })
    }

    /// Fetch one random image for the next category of `cycle`.
    ///
    /// # Errors
    ///
    /// Transport and status errors, or [`ApiError::Parse`] for an
    /// unexpected body.
    pub async fn random(&self, cycle: &mut CategoryCycle) -> Result<RandomImage, ApiError> {
        let category = cycle.advance().map(str::to_string);
        let url = with_query(
            &self.url,
            &[
                ("query", category.clone()),
                ("client_id", Some(self.access_key.clone())),
            ],
        );
        tracing::debug!(category = category.as_deref().unwrap_or("-"), "fetching image");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let photo: UnsplashPhoto = read_json(resp).await?;
        Ok(RandomImage {
            url: photo.urls.full,
            description: photo.description.or(photo.alt_description),
            author: photo.user.map(|user| user.name),
            category,
        })
    }
}
