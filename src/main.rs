use std::sync::Arc;
use std::time::Duration;

use reelmatch_api::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{
        index::IndexLoader,
        posters::{OmdbPosterProvider, PosterLookup, PosterService},
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    // The first generation must build before the server accepts queries
    let loader = IndexLoader::load(&config.corpus_path).await?;

    let (cache, cache_writer) = match &config.redis_url {
        Some(url) => {
            let (cache, handle) = Cache::new(create_redis_client(url)?);
            (Some(cache), Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, poster lookups are not cached");
            (None, None)
        }
    };

    let provider: Option<Arc<dyn PosterLookup>> = match &config.omdb_api_key {
        Some(api_key) => Some(Arc::new(OmdbPosterProvider::new(
            api_key.clone(),
            config.poster_api_url.clone(),
            Duration::from_millis(config.poster_timeout_ms),
            cache,
        )?)),
        None => {
            tracing::info!("OMDB_API_KEY not set, posters resolve to the placeholder");
            None
        }
    };
    let posters = PosterService::new(provider, config.poster_placeholder_url.clone());

    let state = AppState::new(loader, posters).with_limits(config.default_top_n, config.max_top_n);
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
