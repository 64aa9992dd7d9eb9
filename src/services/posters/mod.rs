//! Poster lookup abstraction
//!
//! Posters come from an external lookup-by-title service. Recommendations
//! never depend on it: [`PosterService`] turns every failure or missing image
//! into the configured placeholder reference.

use std::sync::Arc;

use crate::{error::AppResult, models::Poster};

pub mod omdb;

pub use omdb::OmdbPosterProvider;

/// Trait for poster image providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterLookup: Send + Sync {
    /// Looks up a poster image reference by title
    ///
    /// `Ok(None)` means the provider answered but has no image for the title.
    async fn fetch_poster(&self, title: &str) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves posters, degrading to a placeholder instead of failing
#[derive(Clone)]
pub struct PosterService {
    provider: Option<Arc<dyn PosterLookup>>,
    placeholder_url: String,
}

impl PosterService {
    pub fn new(provider: Option<Arc<dyn PosterLookup>>, placeholder_url: String) -> Self {
        Self {
            provider,
            placeholder_url,
        }
    }

    /// A service with no provider; every poster is the placeholder
    pub fn placeholder_only(placeholder_url: String) -> Self {
        Self::new(None, placeholder_url)
    }

    /// Poster for `title`, or the placeholder on any failure
    pub async fn poster_for(&self, title: &str) -> Poster {
        let url = match &self.provider {
            Some(provider) => match provider.fetch_poster(title).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        title = %title,
                        provider = provider.name(),
                        "Poster lookup failed, using placeholder"
                    );
                    None
                }
            },
            None => None,
        };

        match url {
            Some(url) => Poster {
                title: title.to_string(),
                url,
                placeholder: false,
            },
            None => self.placeholder(title),
        }
    }

    /// Posters for several titles, fetched in parallel, in input order
    pub async fn posters_for(&self, titles: Vec<String>) -> Vec<Poster> {
        let mut tasks = Vec::with_capacity(titles.len());

        for title in titles {
            let service = self.clone();
            let lookup_title = title.clone();
            let task = tokio::spawn(async move { service.poster_for(&lookup_title).await });
            tasks.push((title, task));
        }

        let mut posters = Vec::with_capacity(tasks.len());
        for (title, task) in tasks {
            match task.await {
                Ok(poster) => posters.push(poster),
                Err(e) => {
                    tracing::error!(error = %e, title = %title, "Poster task join error");
                    posters.push(self.placeholder(&title));
                }
            }
        }

        posters
    }

    fn placeholder(&self, title: &str) -> Poster {
        Poster {
            title: title.to_string(),
            url: self.placeholder_url.clone(),
            placeholder: true,
        }
    }
}
