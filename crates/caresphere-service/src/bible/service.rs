//! Cached Bible content service.

use crate::bible::client::BibleProvider;
use crate::cache_keys;
use crate::content_cache::ContentCacheService;
use crate::dto::{Book, Chapter, Passage, SearchResults, Translation, Verse, VerseOfDayContent};
use async_trait::async_trait;
use caresphere_config::BibleApiConfig;
use caresphere_core::{CareError, CareResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_SEARCH_LIMIT: u32 = 20;
const MAX_SEARCH_LIMIT: u32 = 100;

/// Read access to Bible content, cache-aside over the provider client.
#[async_trait]
pub trait BibleService: Send + Sync {
    /// Lists available translations.
    async fn list_translations(&self) -> CareResult<Vec<Translation>>;

    /// Lists the books of a translation.
    async fn list_books(&self, translation_id: Option<&str>) -> CareResult<Vec<Book>>;

    /// Returns a single verse.
    async fn get_verse(&self, translation_id: Option<&str>, verse_id: &str) -> CareResult<Verse>;

    /// Returns the verses matching a free-form reference.
    async fn get_passage(&self, translation_id: Option<&str>, reference: &str)
        -> CareResult<Passage>;

    /// Returns a full chapter.
    async fn get_chapter(&self, translation_id: Option<&str>, chapter_id: &str)
        -> CareResult<Chapter>;

    /// Searches verse text. `limit` defaults to 20, capped at 100.
    async fn search(
        &self,
        translation_id: Option<&str>,
        query: &str,
        limit: Option<u32>,
    ) -> CareResult<SearchResults>;

    /// Returns the provider's global verse for `date`.
    ///
    /// The cache key is date-scoped but not translation-scoped: all
    /// organizations share one global verse per day.
    async fn global_verse_of_day(
        &self,
        date: NaiveDate,
        translation_id: Option<&str>,
    ) -> CareResult<VerseOfDayContent>;
}

/// Default implementation backed by [`ContentCacheService`].
pub struct BibleServiceImpl {
    cache: Arc<ContentCacheService>,
    provider: Arc<dyn BibleProvider>,
    config: BibleApiConfig,
}

impl BibleServiceImpl {
    #[must_use]
    pub fn new(
        cache: Arc<ContentCacheService>,
        provider: Arc<dyn BibleProvider>,
        config: BibleApiConfig,
    ) -> Self {
        Self {
            cache,
            provider,
            config,
        }
    }

    fn translation(&self, requested: Option<&str>) -> String {
        match requested {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => self.config.default_translation.clone(),
        }
    }
}

#[async_trait]
impl BibleService for BibleServiceImpl {
    async fn list_translations(&self) -> CareResult<Vec<Translation>> {
        debug!("Listing translations");

        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(
                &cache_keys::translations(),
                "translations",
                self.config.catalog_ttl(),
                move || async move { provider.fetch_translations().await },
            )
            .await
    }

    async fn list_books(&self, translation_id: Option<&str>) -> CareResult<Vec<Book>> {
        let translation = self.translation(translation_id);
        debug!("Listing books for {}", translation);

        let key = cache_keys::books(&translation);
        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(&key, "books", self.config.catalog_ttl(), move || async move {
                provider.fetch_books(&translation).await
            })
            .await
    }

    async fn get_verse(&self, translation_id: Option<&str>, verse_id: &str) -> CareResult<Verse> {
        let translation = self.translation(translation_id);
        debug!("Getting verse {} ({})", verse_id, translation);

        let key = cache_keys::verse(&translation, verse_id);
        let verse_id = verse_id.to_string();
        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(&key, "verse", self.config.verse_ttl(), move || async move {
                provider.fetch_verse(&translation, &verse_id).await
            })
            .await
    }

    async fn get_passage(
        &self,
        translation_id: Option<&str>,
        reference: &str,
    ) -> CareResult<Passage> {
        let translation = self.translation(translation_id);
        debug!("Getting passage {} ({})", reference, translation);

        let key = cache_keys::passage(&translation, reference);
        let reference = reference.to_string();
        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(&key, "passage", self.config.verse_ttl(), move || async move {
                provider.fetch_passage(&translation, &reference).await
            })
            .await
    }

    async fn get_chapter(
        &self,
        translation_id: Option<&str>,
        chapter_id: &str,
    ) -> CareResult<Chapter> {
        let translation = self.translation(translation_id);
        debug!("Getting chapter {} ({})", chapter_id, translation);

        let key = cache_keys::chapter(&translation, chapter_id);
        let chapter_id = chapter_id.to_string();
        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(&key, "chapter", self.config.verse_ttl(), move || async move {
                provider.fetch_chapter(&translation, &chapter_id).await
            })
            .await
    }

    async fn search(
        &self,
        translation_id: Option<&str>,
        query: &str,
        limit: Option<u32>,
    ) -> CareResult<SearchResults> {
        if query.trim().is_empty() {
            return Err(CareError::validation("Search query must not be blank"));
        }
        let translation = self.translation(translation_id);
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT);
        debug!("Searching '{}' in {} (limit {})", query, translation, limit);

        let key = cache_keys::search(&translation, query, limit);
        let query = query.to_string();
        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(&key, "search", self.config.search_ttl(), move || async move {
                provider.search(&translation, &query, limit).await
            })
            .await
    }

    async fn global_verse_of_day(
        &self,
        date: NaiveDate,
        translation_id: Option<&str>,
    ) -> CareResult<VerseOfDayContent> {
        let translation = self.translation(translation_id);
        debug!("Getting global verse of the day for {}", date);

        let key = cache_keys::verse_of_day(date);
        let provider = Arc::clone(&self.provider);
        self.cache
            .cached_fetch(&key, "votd", self.config.votd_ttl(), move || async move {
                provider.fetch_verse_of_day(&translation).await
            })
            .await
    }
}

impl std::fmt::Debug for BibleServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BibleServiceImpl")
            .field("default_translation", &self.config.default_translation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caresphere_core::CacheEntry;
    use caresphere_repository::traits::CacheEntryRepository;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCacheRepo {
        entries: Mutex<HashMap<String, CacheEntry>>,
    }

    impl InMemoryCacheRepo {
        fn get(&self, key: &str) -> Option<CacheEntry> {
            self.entries.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl CacheEntryRepository for InMemoryCacheRepo {
        async fn find_by_key(&self, cache_key: &str) -> CareResult<Option<CacheEntry>> {
            Ok(self.entries.lock().unwrap().get(cache_key).cloned())
        }

        async fn upsert(&self, entry: &CacheEntry) -> CareResult<CacheEntry> {
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

    #[derive(Default)]
    struct MockProvider {
        fetches: AtomicUsize,
        translations_seen: Mutex<Vec<String>>,
        limits_seen: Mutex<Vec<u32>>,
        fail_with: Mutex<Option<CareError>>,
    }

    impl MockProvider {
        fn record(&self, translation_id: &str) -> CareResult<()> {
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.translations_seen
                .lock()
                .unwrap()
                .push(translation_id.to_string());
            Ok(())
        }

        fn verse(translation_id: &str, verse_id: &str) -> Verse {
            Verse {
                id: verse_id.to_string(),
                reference: "John 3:16".to_string(),
                text: "For God so loved the world".to_string(),
                translation_id: translation_id.to_string(),
            }
        }
    }

    #[async_trait]
    impl BibleProvider for MockProvider {
        async fn fetch_translations(&self) -> CareResult<Vec<Translation>> {
            self.record("-")?;
            Ok(vec![Translation {
                id: "web".to_string(),
                name: "World English Bible".to_string(),
                abbreviation: Some("WEB".to_string()),
                language: Some("eng".to_string()),
            }])
        }

        async fn fetch_books(&self, translation_id: &str) -> CareResult<Vec<Book>> {
            self.record(translation_id)?;
            Ok(vec![Book {
                id: "GEN".to_string(),
                name: "Genesis".to_string(),
                testament: Some("OT".to_string()),
            }])
        }

        async fn fetch_verse(&self, translation_id: &str, verse_id: &str) -> CareResult<Verse> {
            self.record(translation_id)?;
            Ok(Self::verse(translation_id, verse_id))
        }

        async fn fetch_passage(
            &self,
            translation_id: &str,
            reference: &str,
        ) -> CareResult<Passage> {
            self.record(translation_id)?;
            Ok(Passage {
                reference: reference.to_string(),
                translation_id: translation_id.to_string(),
                verses: vec![Self::verse(translation_id, "JHN.3.16")],
            })
        }

        async fn fetch_chapter(
            &self,
            translation_id: &str,
            chapter_id: &str,
        ) -> CareResult<Chapter> {
            self.record(translation_id)?;
            Ok(Chapter {
                id: chapter_id.to_string(),
                reference: "Psalm 23".to_string(),
                content: "The Lord is my shepherd".to_string(),
                verse_count: Some(6),
                translation_id: translation_id.to_string(),
            })
        }

        async fn search(
            &self,
            translation_id: &str,
            query: &str,
            limit: u32,
        ) -> CareResult<SearchResults> {
            self.record(translation_id)?;
            self.limits_seen.lock().unwrap().push(limit);
            Ok(SearchResults {
                query: query.to_string(),
                total: 1,
                verses: vec![Self::verse(translation_id, "PSA.23.1")],
            })
        }

        async fn fetch_verse_of_day(&self, translation_id: &str) -> CareResult<VerseOfDayContent> {
            self.record(translation_id)?;
            Ok(VerseOfDayContent {
                reference: "PRO.3.5".to_string(),
                text: "Trust in the Lord".to_string(),
                translation_id: translation_id.to_string(),
            })
        }
    }

    fn setup() -> (Arc<InMemoryCacheRepo>, Arc<MockProvider>, BibleServiceImpl) {
        let repo = Arc::new(InMemoryCacheRepo::default());
        let provider = Arc::new(MockProvider::default());
        let cache = Arc::new(ContentCacheService::new(
            Arc::clone(&repo) as Arc<dyn CacheEntryRepository>,
            "bible-api",
        ));
        let service = BibleServiceImpl::new(
            cache,
            Arc::clone(&provider) as Arc<dyn BibleProvider>,
            BibleApiConfig::default(),
        );
        (repo, provider, service)
    }

    #[tokio::test]
    async fn test_verse_fetched_once_within_ttl() {
        let (_repo, provider, service) = setup();

        let first = service.get_verse(Some("web"), "JHN.3.16").await.unwrap();
        let second = service.get_verse(Some("web"), "JHN.3.16").await.unwrap();

        assert_eq!(first.text, second.text);
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_translation_falls_back_to_default() {
        let (repo, provider, service) = setup();

        service.get_verse(None, "JHN.3.16").await.unwrap();

        assert_eq!(provider.translations_seen.lock().unwrap()[0], "web");
        assert!(repo.get("verse:web:JHN.3.16").is_some());
    }

    #[tokio::test]
    async fn test_blank_translation_treated_as_missing() {
        let (repo, _provider, service) = setup();

        service.get_verse(Some("  "), "JHN.3.16").await.unwrap();

        assert!(repo.get("verse:web:JHN.3.16").is_some());
    }

    #[tokio::test]
    async fn test_catalog_resources_use_catalog_ttl() {
        let (repo, _provider, service) = setup();

        service.list_books(Some("web")).await.unwrap();

        let entry = repo.get("books:web").unwrap();
        assert_eq!(entry.resource_type, "books");
        // Catalog TTL is 30 days against 7 for verses.
        assert!(entry.expires_at > Utc::now() + ChronoDuration::days(29));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query_before_fetching() {
        let (_repo, provider, service) = setup();

        let err = service.search(Some("web"), "   ", None).await.unwrap_err();

        assert!(matches!(err, CareError::Validation(_)));
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_applies_default_limit() {
        let (repo, provider, service) = setup();

        service.search(Some("web"), "shepherd", None).await.unwrap();

        assert_eq!(provider.limits_seen.lock().unwrap()[0], 20);
        assert!(repo.get("search:web:shepherd:20").is_some());
    }

    #[tokio::test]
    async fn test_search_caps_excessive_limit() {
        let (repo, provider, service) = setup();

        service.search(Some("web"), "love", Some(5000)).await.unwrap();

        assert_eq!(provider.limits_seen.lock().unwrap()[0], 100);
        assert!(repo.get("search:web:love:100").is_some());
    }

    #[tokio::test]
    async fn test_verse_of_day_cache_is_date_scoped() {
        let (repo, provider, service) = setup();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();

        service.global_verse_of_day(monday, None).await.unwrap();
        service.global_verse_of_day(monday, None).await.unwrap();
        service.global_verse_of_day(tuesday, None).await.unwrap();

        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
        assert!(repo.get("votd:2025-06-02").is_some());
        assert!(repo.get("votd:2025-06-03").is_some());
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_no_cache_entry() {
        let (repo, provider, service) = setup();
        *provider.fail_with.lock().unwrap() =
            Some(CareError::upstream("bible-api", 500, "boom"));

        let err = service.get_verse(Some("web"), "JHN.3.16").await.unwrap_err();

        assert!(matches!(err, CareError::Upstream { status: 500, .. }));
        assert!(repo.get("verse:web:JHN.3.16").is_none());
    }
}
