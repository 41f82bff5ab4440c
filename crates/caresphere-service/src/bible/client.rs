//! HTTP client for the remote Bible content provider.

use crate::bible::envelope::{ListEnvelope, ObjectEnvelope, SearchEnvelope};
use crate::dto::{Book, Chapter, Passage, SearchResults, Translation, Verse, VerseOfDayContent};
use async_trait::async_trait;
use caresphere_config::BibleApiConfig;
use caresphere_core::{CareError, CareResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Service label used in upstream and transport errors.
pub const PROVIDER: &str = "bible-api";

/// One function per remote resource kind. Callers go through
/// [`crate::bible::BibleService`], which layers caching on top; nothing
/// here caches or retries.
#[async_trait]
pub trait BibleProvider: Send + Sync {
    /// Fetches the catalog of available translations.
    async fn fetch_translations(&self) -> CareResult<Vec<Translation>>;

    /// Fetches the books of one translation.
    async fn fetch_books(&self, translation_id: &str) -> CareResult<Vec<Book>>;

    /// Fetches a single verse by provider verse id.
    async fn fetch_verse(&self, translation_id: &str, verse_id: &str) -> CareResult<Verse>;

    /// Fetches the verses matching a free-form reference.
    async fn fetch_passage(&self, translation_id: &str, reference: &str) -> CareResult<Passage>;

    /// Fetches a full chapter by provider chapter id.
    async fn fetch_chapter(&self, translation_id: &str, chapter_id: &str) -> CareResult<Chapter>;

    /// Searches verse text within one translation.
    async fn search(&self, translation_id: &str, query: &str, limit: u32)
        -> CareResult<SearchResults>;

    /// Fetches the provider's global verse of the day.
    async fn fetch_verse_of_day(&self, translation_id: &str) -> CareResult<VerseOfDayContent>;
}

/// Client for the hosted scripture API.
pub struct BibleApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BibleApiClient {
    /// Creates a client from configuration.
    ///
    /// No request timeout is set: content reads ride on transport
    /// defaults, the messaging client is the only outbound path with an
    /// explicit deadline.
    pub fn new(config: &BibleApiConfig) -> CareResult<Self> {
        let client = Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .map_err(|e| CareError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fails fast, before any network traffic, when no key is configured.
    fn bearer_key(&self) -> CareResult<&str> {
        if self.api_key.trim().is_empty() {
            return Err(CareError::configuration(
                "Bible API key is not configured (CARESPHERE__BIBLE__API_KEY)",
            ));
        }
        Ok(&self.api_key)
    }
}

#[derive(Debug, Deserialize)]
struct WireTranslation {
    id: String,
    name: String,
    #[serde(default)]
    abbreviation: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl From<WireTranslation> for Translation {
    fn from(wire: WireTranslation) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            abbreviation: wire.abbreviation,
            language: wire.language,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireBook {
    id: String,
    name: String,
    #[serde(default)]
    testament: Option<String>,
}

impl From<WireBook> for Book {
    fn from(wire: WireBook) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            testament: wire.testament,
        }
    }
}

/// Verse payloads label the body `text` or `content` depending on the
/// endpoint.
#[derive(Debug, Deserialize)]
struct WireVerse {
    id: String,
    reference: String,
    #[serde(alias = "content")]
    text: String,
}

impl WireVerse {
    fn into_verse(self, translation_id: &str) -> Verse {
        Verse {
            id: self.id,
            reference: self.reference,
            text: self.text,
            translation_id: translation_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireChapter {
    id: String,
    reference: String,
    #[serde(alias = "text")]
    content: String,
    #[serde(default, alias = "verseCount")]
    verse_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireVerseOfDay {
    reference: String,
    #[serde(alias = "content")]
    text: String,
    #[serde(default)]
    version: Option<String>,
}

#[async_trait]
impl BibleProvider for BibleApiClient {
    async fn fetch_translations(&self) -> CareResult<Vec<Translation>> {
        let key = self.bearer_key()?;
        debug!("Fetching translation catalog");

        let response = self
            .client
            .get(self.url("/versions"))
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: ListEnvelope<WireTranslation> =
            decode(response, "TranslationList", "all").await?;
        Ok(envelope.into_items().into_iter().map(Translation::from).collect())
    }

    async fn fetch_books(&self, translation_id: &str) -> CareResult<Vec<Book>> {
        let key = self.bearer_key()?;
        debug!("Fetching books for translation {}", translation_id);

        let response = self
            .client
            .get(self.url(&format!("/versions/{}/books", translation_id)))
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: ListEnvelope<WireBook> = decode(response, "Translation", translation_id).await?;
        Ok(envelope.into_items().into_iter().map(Book::from).collect())
    }

    async fn fetch_verse(&self, translation_id: &str, verse_id: &str) -> CareResult<Verse> {
        let key = self.bearer_key()?;
        debug!("Fetching verse {} ({})", verse_id, translation_id);

        let response = self
            .client
            .get(self.url(&format!("/verses/{}", verse_id)))
            .bearer_auth(key)
            .query(&[("version", translation_id)])
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: ObjectEnvelope<WireVerse> = decode(response, "Verse", verse_id).await?;
        Ok(envelope.into_inner().into_verse(translation_id))
    }

    async fn fetch_passage(&self, translation_id: &str, reference: &str) -> CareResult<Passage> {
        let key = self.bearer_key()?;
        debug!("Fetching passage {} ({})", reference, translation_id);

        let response = self
            .client
            .get(self.url("/passages"))
            .bearer_auth(key)
            .query(&[("reference", reference), ("version", translation_id)])
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: ListEnvelope<WireVerse> = decode(response, "Passage", reference).await?;
        Ok(Passage {
            reference: reference.to_string(),
            translation_id: translation_id.to_string(),
            verses: envelope
                .into_items()
                .into_iter()
                .map(|v| v.into_verse(translation_id))
                .collect(),
        })
    }

    async fn fetch_chapter(&self, translation_id: &str, chapter_id: &str) -> CareResult<Chapter> {
        let key = self.bearer_key()?;
        debug!("Fetching chapter {} ({})", chapter_id, translation_id);

        let response = self
            .client
            .get(self.url(&format!("/chapters/{}", chapter_id)))
            .bearer_auth(key)
            .query(&[("version", translation_id)])
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: ObjectEnvelope<WireChapter> = decode(response, "Chapter", chapter_id).await?;
        let wire = envelope.into_inner();
        Ok(Chapter {
            id: wire.id,
            reference: wire.reference,
            content: wire.content,
            verse_count: wire.verse_count,
            translation_id: translation_id.to_string(),
        })
    }

    async fn search(
        &self,
        translation_id: &str,
        query: &str,
        limit: u32,
    ) -> CareResult<SearchResults> {
        let key = self.bearer_key()?;
        debug!("Searching '{}' in {} (limit {})", query, translation_id, limit);

        let response = self
            .client
            .get(self.url("/search"))
            .bearer_auth(key)
            .query(&[
                ("query", query),
                ("version", translation_id),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: SearchEnvelope<WireVerse> = decode(response, "Translation", translation_id).await?;
        let body = envelope.into_body();
        let verses: Vec<Verse> = body
            .verses
            .into_iter()
            .map(|v| v.into_verse(translation_id))
            .collect();
        Ok(SearchResults {
            query: query.to_string(),
            total: body.total.unwrap_or(verses.len() as u32),
            verses,
        })
    }

    async fn fetch_verse_of_day(&self, translation_id: &str) -> CareResult<VerseOfDayContent> {
        let key = self.bearer_key()?;
        debug!("Fetching verse of the day ({})", translation_id);

        let response = self
            .client
            .get(self.url("/verse-of-the-day"))
            .bearer_auth(key)
            .query(&[("version", translation_id)])
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let envelope: ObjectEnvelope<WireVerseOfDay> =
            decode(response, "VerseOfDay", translation_id).await?;
        let wire = envelope.into_inner();
        Ok(VerseOfDayContent {
            reference: wire.reference,
            text: wire.text,
            translation_id: wire.version.unwrap_or_else(|| translation_id.to_string()),
        })
    }
}

impl std::fmt::Debug for BibleApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BibleApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    resource_type: &'static str,
    resource_id: &str,
) -> CareResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_provider_error(status, &body, resource_type, resource_id));
    }

    response
        .json()
        .await
        .map_err(|e| CareError::external_service(PROVIDER, format!("JSON parse error: {}", e)))
}

fn map_provider_error(
    status: StatusCode,
    body: &str,
    resource_type: &'static str,
    resource_id: &str,
) -> CareError {
    match status {
        StatusCode::NOT_FOUND => CareError::not_found(resource_type, resource_id),
        _ => CareError::upstream(PROVIDER, status.as_u16(), body),
    }
}
