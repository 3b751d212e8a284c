//! Shared command execution helpers

use std::future::Future;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tropeiro_domain::Result;
use tropeiro_infra::{QueryCache, QueryKey};

use crate::utils::logging::log_command_execution;

/// Run a command body with timing and a structured outcome log.
pub async fn run_command<T, F>(command: &str, body: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let result = body.await;
    log_command_execution(command, started.elapsed(), result.as_ref().map(|_| ()));
    result
}

/// Read-through cache: answer from the cache when fresh, otherwise fetch,
/// store and answer.
///
/// Fetch errors are never cached, so a failed read retries on the next
/// call instead of pinning the failure for a TTL.
pub async fn cached<T, F, Fut>(cache: &QueryCache, key: QueryKey, fetch: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(hit) = cache.get::<T>(&key) {
        return Ok(hit);
    }
    let value = fetch().await?;
    cache.insert(key, &value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tropeiro_domain::{CacheConfig, ErpError};
    use tropeiro_infra::EntityKind;

    #[tokio::test]
    async fn cached_fetches_once_and_serves_the_copy() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = QueryKey::bare(EntityKind::Orders, Some(7));

        let first: Vec<i64> =
            cached(&cache, key.clone(), || async { Ok(vec![1, 2, 3]) }).await.unwrap();
        assert_eq!(first, vec![1, 2, 3]);

        // Second fetch would answer differently; the cache must not ask.
        let second: Vec<i64> =
            cached(&cache, key, || async { Ok(vec![9]) }).await.unwrap();
        assert_eq!(second, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn cached_does_not_store_failures() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = QueryKey::bare(EntityKind::Orders, Some(7));

        let failed: Result<Vec<i64>> = cached(&cache, key.clone(), || async {
            Err(ErpError::Network("offline".into()))
        })
        .await;
        assert!(failed.is_err());

        let recovered: Vec<i64> =
            cached(&cache, key, || async { Ok(vec![4]) }).await.unwrap();
        assert_eq!(recovered, vec![4]);
    }
}
