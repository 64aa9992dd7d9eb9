/// A macro to simplify read-through caching with Redis.
///
/// Returns the cached value when present. Otherwise runs `$block`, queues the
/// result for a background write and returns it. A failed cache read is logged
/// and treated as a miss, so a Redis outage only costs the cache.
///
/// # Arguments
/// * `$cache`: The cache instance. It must have `get_from_cache` and
///   `set_in_background` methods.
/// * `$key`: The cache key. Evaluated more than once, so pass a binding.
/// * `$ttl`: The time-to-live (TTL) for the cached value in seconds.
/// * `$block`: A future computing the value on a miss.
///
/// # Example
/// ```rust,ignore
/// let key = CacheKey::Poster(title.to_string());
/// let url: Option<String> = cached!(cache, key, POSTER_CACHE_TTL, async move {
///     fetch_from_api(title).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(cached)) => Ok(cached),
            result => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, key = %$key, "Cache read failed, treating as miss");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
