/// A macro to simplify caching logic using Redis.
///
/// Checks the cache for the given key and returns the cached value on a hit.
/// On a miss, runs the provided block, stores the computed value in the
/// background, and returns it.
///
/// # Arguments
/// * `$cache`: A cache with `get_from_cache` and `set_in_background` methods.
/// * `$key`: The key to use for caching the value.
/// * `$ttl`: The time-to-live (TTL) for the cached value in seconds.
/// * `$block`: The block of code to execute if the value is not found in cache.
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
