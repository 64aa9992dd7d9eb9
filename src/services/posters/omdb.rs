//! OMDb poster provider
//!
//! Looks titles up with `GET {api_url}/?t={title}&apikey={key}` and reads the
//! `Poster` field. Lookups are cached in Redis when a cache is configured.

use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::OmdbTitle,
    services::posters::PosterLookup,
};

const POSTER_CACHE_TTL: u64 = 604800; // 1 week

#[derive(Clone)]
pub struct OmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
}

impl OmdbPosterProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        timeout: Duration,
        cache: Option<Cache>,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    fn lookup_url(&self) -> String {
        format!("{}/", self.api_url)
    }

    /// Queries the API directly, bypassing the cache
    async fn request_poster(&self, title: &str) -> AppResult<Option<String>> {
        let response = self
            .http_client
            .get(self.lookup_url())
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let result: OmdbTitle = response.json().await?;
        if let Some(error) = &result.error {
            tracing::debug!(title = %title, error = %error, "OMDb has no entry for title");
        }

        let poster = result.poster_url();

        tracing::info!(
            title = %title,
            found = poster.is_some(),
            provider = "omdb",
            "Poster lookup completed"
        );

        Ok(poster)
    }
}

#[async_trait::async_trait]
impl PosterLookup for OmdbPosterProvider {
    async fn fetch_poster(&self, title: &str) -> AppResult<Option<String>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput(
                "Poster lookup title cannot be empty".to_string(),
            ));
        }

        match &self.cache {
            Some(cache) => {
                let key = CacheKey::Poster(title.to_string());
                cached!(cache, key, POSTER_CACHE_TTL, self.request_poster(title))
            }
            None => self.request_poster(title).await,
        }
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
