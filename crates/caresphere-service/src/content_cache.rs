//! Database-backed cache-aside orchestration.
//!
//! All provider content flows through [`ContentCacheService::cached_fetch`]:
//! serve a fresh cached payload when one exists, otherwise invoke the
//! fetcher and persist its result. Hit counting rides on the hit path as a
//! spawned best-effort write so it can never delay or fail a read.

use caresphere_core::{effects, CacheEntry, CareResult};
use caresphere_repository::traits::CacheEntryRepository;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Cache-aside layer over the `cache_entries` table.
pub struct ContentCacheService {
    repository: Arc<dyn CacheEntryRepository>,
    provider: &'static str,
}

impl ContentCacheService {
    #[must_use]
    pub fn new(repository: Arc<dyn CacheEntryRepository>, provider: &'static str) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Returns the cached value for `cache_key`, fetching and storing it
    /// on a miss or on expiry.
    ///
    /// Fetcher errors propagate unchanged and nothing is written for
    /// them, so a failed refresh leaves any previous (stale) row in
    /// place. Concurrent misses for the same key may each invoke the
    /// fetcher; the last upsert wins, which is acceptable because the
    /// payloads are equivalent.
    pub async fn cached_fetch<T, F, Fut>(
        &self,
        cache_key: &str,
        resource_type: &str,
        ttl: Duration,
        fetcher: F,
    ) -> CareResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CareResult<T>>,
    {
        match self.repository.find_by_key(cache_key).await? {
            Some(entry) if entry.is_fresh() => {
                debug!("Cache hit: {}", cache_key);
                let repository = Arc::clone(&self.repository);
                let key = entry.cache_key.clone();
                effects::spawn_logged("cache_hit_count", async move {
                    repository.increment_hit_count(&key).await
                });
                return Ok(serde_json::from_value(entry.payload)?);
            }
            Some(_) => debug!("Cache expired: {}", cache_key),
            None => debug!("Cache miss: {}", cache_key),
        }

        let value = fetcher().await?;

        let payload = serde_json::to_value(&value)?;
        let entry = CacheEntry::new(cache_key, self.provider, resource_type, payload, ttl);
        self.repository.upsert(&entry).await?;
        debug!("Cache stored: {} (ttl {}s)", cache_key, ttl.as_secs());

        Ok(value)
    }
}

impl std::fmt::Debug for ContentCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCacheService")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use caresphere_core::CareError;
    use chrono::{Duration as ChronoDuration, Utc};
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestVerse {
        id: String,
        reference: String,
        text: String,
    }

    fn john_3_16() -> TestVerse {
        TestVerse {
            id: "JHN.3.16".to_string(),
            reference: "John 3:16".to_string(),
            text: "For God so loved the world".to_string(),
        }
    }

    #[derive(Default)]
    struct InMemoryCacheRepo {
        entries: Mutex<HashMap<String, CacheEntry>>,
        upsert_calls: AtomicUsize,
    }

    impl InMemoryCacheRepo {
        fn seed(&self, entry: CacheEntry) {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.cache_key.clone(), entry);
        }

        fn get(&self, key: &str) -> Option<CacheEntry> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CacheEntryRepository for InMemoryCacheRepo {
        async fn find_by_key(&self, cache_key: &str) -> CareResult<Option<CacheEntry>> {
            Ok(self.entries.lock().unwrap().get(cache_key).cloned())
        }

        async fn upsert(&self, entry: &CacheEntry) -> CareResult<CacheEntry> {
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            self.entries
                .lock()
                .unwrap()
                .insert(entry.cache_key.clone(), entry.clone());
            Ok(entry.clone())
        }

        async fn increment_hit_count(&self, cache_key: &str) -> CareResult<()> {
            if let Some(entry) = self.entries.lock().unwrap().get_mut(cache_key) {
                entry.hit_count += 1;
            }
            Ok(())
        }
    }

    fn service(repo: &Arc<InMemoryCacheRepo>) -> ContentCacheService {
        ContentCacheService::new(Arc::clone(repo) as Arc<dyn CacheEntryRepository>, "bible-api")
    }

    /// Gives spawned best-effort writes a chance to run.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_skips_fetcher() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let cache = service(&repo);
        let fetches = AtomicUsize::new(0);

        for _ in 0..2 {
            let verse: TestVerse = cache
                .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(604_800), || {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    async { Ok(john_3_16()) }
                })
                .await
                .unwrap();
            assert_eq!(verse, john_3_16());
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(repo.upsert_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_value_wins_over_changed_upstream() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let cache = service(&repo);
        let fetches = Arc::new(AtomicUsize::new(0));

        // The provider would hand back different content on a second
        // fetch; within the TTL the first payload must be served instead.
        for _ in 0..2 {
            let fetches = Arc::clone(&fetches);
            let verse: TestVerse = cache
                .cached_fetch("verse:1:GEN.1.1", "verse", Duration::from_secs(86_400), move || async move {
                    let call = fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(TestVerse {
                        id: "v1".to_string(),
                        reference: "Genesis 1:1".to_string(),
                        text: if call == 0 {
                            "In the beginning...".to_string()
                        } else {
                            "CHANGED".to_string()
                        },
                    })
                })
                .await
                .unwrap();
            assert_eq!(verse.text, "In the beginning...");
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched_and_replaced() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let mut stale = CacheEntry::new(
            "verse:web:JHN.3.16",
            "bible-api",
            "verse",
            serde_json::to_value(john_3_16()).unwrap(),
            Duration::from_secs(0),
        );
        stale.expires_at = Utc::now() - ChronoDuration::hours(1);
        repo.seed(stale);

        let cache = service(&repo);
        let refreshed = TestVerse {
            text: "For God so loved the world, that he gave".to_string(),
            ..john_3_16()
        };
        let expected = refreshed.clone();

        let verse: TestVerse = cache
            .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(604_800), || async {
                Ok(refreshed)
            })
            .await
            .unwrap();

        assert_eq!(verse, expected);
        let stored = repo.get("verse:web:JHN.3.16").unwrap();
        assert!(stored.is_fresh());
        assert_eq!(
            serde_json::from_value::<TestVerse>(stored.payload).unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_and_writes_nothing() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let cache = service(&repo);

        let result: CareResult<TestVerse> = cache
            .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(60), || async {
                Err(CareError::upstream("bible-api", 503, "unavailable"))
            })
            .await;

        match result.unwrap_err() {
            CareError::Upstream { status, .. } => assert_eq!(status, 503),
            other => panic!("expected upstream error, got {:?}", other),
        }
        assert_eq!(repo.len(), 0);

        // A later successful call starts from a clean miss.
        let fetches = AtomicUsize::new(0);
        let verse: TestVerse = cache
            .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(60), || {
                fetches.fetch_add(1, Ordering::SeqCst);
                async { Ok(john_3_16()) }
            })
            .await
            .unwrap();
        assert_eq!(verse, john_3_16());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_hit_increments_counter_without_blocking_read() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let cache = service(&repo);

        let _: TestVerse = cache
            .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(60), || async {
                Ok(john_3_16())
            })
            .await
            .unwrap();
        assert_eq!(repo.get("verse:web:JHN.3.16").unwrap().hit_count, 0);

        let _: TestVerse = cache
            .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(60), || async {
                Ok(john_3_16())
            })
            .await
            .unwrap();

        settle().await;
        assert_eq!(repo.get("verse:web:JHN.3.16").unwrap().hit_count, 1);
    }

    #[tokio::test]
    async fn test_stored_entry_carries_provider_and_resource_type() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let cache = service(&repo);

        let _: Vec<String> = cache
            .cached_fetch("translations", "translation_list", Duration::from_secs(60), || async {
                Ok(vec!["web".to_string(), "kjv".to_string()])
            })
            .await
            .unwrap();

        let stored = repo.get("translations").unwrap();
        assert_eq!(stored.provider, "bible-api");
        assert_eq!(stored.resource_type, "translation_list");
        assert_eq!(stored.hit_count, 0);
    }

    #[tokio::test]
    async fn test_corrupt_cached_payload_surfaces_as_serialization_error() {
        let repo = Arc::new(InMemoryCacheRepo::default());
        repo.seed(CacheEntry::new(
            "verse:web:JHN.3.16",
            "bible-api",
            "verse",
            serde_json::json!({ "unexpected": true }),
            Duration::from_secs(60),
        ));
        let cache = service(&repo);

        let result: CareResult<TestVerse> = cache
            .cached_fetch("verse:web:JHN.3.16", "verse", Duration::from_secs(60), || async {
                Ok(john_3_16())
            })
            .await;

        assert!(matches!(result.unwrap_err(), CareError::Serialization(_)));
    }
}
