//! Bible content controller.
//!
//! Read-side endpoints over the provider-backed content cache. Handlers
//! stay thin: translation and date defaults live in the service layer
//! except for the global verse-of-day date, which is resolved here.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use caresphere_service::{
    Book, Chapter, Passage, SearchResults, Translation, Verse, VerseOfDayContent,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

/// Creates the bible content router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/translations", get(list_translations))
        .route("/translations/:translation_id/books", get(list_books))
        .route("/verses/:verse_id", get(get_verse))
        .route("/passages/:reference", get(get_passage))
        .route("/chapters/:chapter_id", get(get_chapter))
        .route("/search", get(search_verses))
        .route("/verse-of-day", get(global_verse_of_day))
}

/// Translation selector shared by most content endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationQuery {
    /// Translation identifier. Falls back to the configured default.
    #[serde(default)]
    pub translation: Option<String>,
}

/// Query parameters for verse search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Search terms.
    pub query: String,
    /// Translation identifier. Falls back to the configured default.
    #[serde(default)]
    pub translation: Option<String>,
    /// Maximum number of results.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Query parameters for the global verse of the day.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalVotdQuery {
    /// Date to resolve, defaulting to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Translation identifier. Falls back to the configured default.
    #[serde(default)]
    pub translation: Option<String>,
}

/// List available translations.
#[utoipa::path(
    get,
    path = "/api/v1/bible/translations",
    tag = "bible",
    responses(
        (status = 200, description = "Available translations", body = [Translation])
    )
)]
pub async fn list_translations(State(state): State<AppState>) -> ApiResult<Vec<Translation>> {
    debug!("List translations request");

    let translations = state.bible.list_translations().await?;
    ok(translations)
}

/// List books for a translation.
#[utoipa::path(
    get,
    path = "/api/v1/bible/translations/{translation_id}/books",
    tag = "bible",
    params(("translation_id" = String, Path, description = "Translation identifier")),
    responses(
        (status = 200, description = "Books in the translation", body = [Book]),
        (status = 404, description = "Unknown translation")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Path(translation_id): Path<String>,
) -> ApiResult<Vec<Book>> {
    debug!("List books request: {}", translation_id);

    let books = state.bible.list_books(Some(&translation_id)).await?;
    ok(books)
}

/// Get a single verse.
#[utoipa::path(
    get,
    path = "/api/v1/bible/verses/{verse_id}",
    tag = "bible",
    params(
        ("verse_id" = String, Path, description = "Provider verse identifier"),
        ("translation" = Option<String>, Query, description = "Translation identifier")
    ),
    responses(
        (status = 200, description = "The verse", body = Verse),
        (status = 404, description = "Unknown verse")
    )
)]
pub async fn get_verse(
    State(state): State<AppState>,
    Path(verse_id): Path<String>,
    Query(query): Query<TranslationQuery>,
) -> ApiResult<Verse> {
    debug!("Get verse request: {}", verse_id);

    let verse = state
        .bible
        .get_verse(query.translation.as_deref(), &verse_id)
        .await?;
    ok(verse)
}

/// Get a passage by human-readable reference.
#[utoipa::path(
    get,
    path = "/api/v1/bible/passages/{reference}",
    tag = "bible",
    params(
        ("reference" = String, Path, description = "Passage reference, e.g. `John 3:16-17`"),
        ("translation" = Option<String>, Query, description = "Translation identifier")
    ),
    responses(
        (status = 200, description = "The passage", body = Passage),
        (status = 404, description = "Unknown reference")
    )
)]
pub async fn get_passage(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Query(query): Query<TranslationQuery>,
) -> ApiResult<Passage> {
    debug!("Get passage request: {}", reference);

    let passage = state
        .bible
        .get_passage(query.translation.as_deref(), &reference)
        .await?;
    ok(passage)
}

/// Get a full chapter.
#[utoipa::path(
    get,
    path = "/api/v1/bible/chapters/{chapter_id}",
    tag = "bible",
    params(
        ("chapter_id" = String, Path, description = "Provider chapter identifier"),
        ("translation" = Option<String>, Query, description = "Translation identifier")
    ),
    responses(
        (status = 200, description = "The chapter", body = Chapter),
        (status = 404, description = "Unknown chapter")
    )
)]
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(chapter_id): Path<String>,
    Query(query): Query<TranslationQuery>,
) -> ApiResult<Chapter> {
    debug!("Get chapter request: {}", chapter_id);

    let chapter = state
        .bible
        .get_chapter(query.translation.as_deref(), &chapter_id)
        .await?;
    ok(chapter)
}

/// Search verses by keyword.
#[utoipa::path(
    get,
    path = "/api/v1/bible/search",
    tag = "bible",
    params(
        ("query" = String, Query, description = "Search terms"),
        ("translation" = Option<String>, Query, description = "Translation identifier"),
        ("limit" = Option<u32>, Query, description = "Maximum number of results")
    ),
    responses(
        (status = 200, description = "Search results", body = SearchResults),
        (status = 400, description = "Blank query")
    )
)]
pub async fn search_verses(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResults> {
    debug!("Search request: {}", query.query);

    let results = state
        .bible
        .search(query.translation.as_deref(), &query.query, query.limit)
        .await?;
    ok(results)
}

/// Get the global verse of the day.
#[utoipa::path(
    get,
    path = "/api/v1/bible/verse-of-day",
    tag = "bible",
    params(
        ("date" = Option<String>, Query, description = "Date to resolve (YYYY-MM-DD), defaulting to today"),
        ("translation" = Option<String>, Query, description = "Translation identifier")
    ),
    responses(
        (status = 200, description = "Verse of the day", body = VerseOfDayContent)
    )
)]
pub async fn global_verse_of_day(
    State(state): State<AppState>,
    Query(query): Query<GlobalVotdQuery>,
) -> ApiResult<VerseOfDayContent> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    debug!("Global verse of day request: {}", date);

    let verse = state
        .bible
        .global_verse_of_day(date, query.translation.as_deref())
        .await?;
    ok(verse)
}
