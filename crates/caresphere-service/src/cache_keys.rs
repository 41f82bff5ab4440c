//! Cache key generators for consistent key naming.
//!
//! Keys are not namespaced with a prefix: the `cache_entries` table belongs
//! to this service alone. Inputs are embedded verbatim because provider
//! identifiers (verse IDs, translation codes) are case-sensitive.

use chrono::NaiveDate;

/// Key for the translation catalog. Not translation-scoped.
#[must_use]
pub fn translations() -> String {
    "translations".to_string()
}

/// Key for the book list of one translation.
#[must_use]
pub fn books(translation_id: &str) -> String {
    format!("books:{}", translation_id)
}

/// Key for a single verse.
#[must_use]
pub fn verse(translation_id: &str, verse_id: &str) -> String {
    format!("verse:{}:{}", translation_id, verse_id)
}

/// Key for a passage lookup by free-form reference.
#[must_use]
pub fn passage(translation_id: &str, reference: &str) -> String {
    format!("passage:{}:{}", translation_id, reference)
}

/// Key for a full chapter.
#[must_use]
pub fn chapter(translation_id: &str, chapter_id: &str) -> String {
    format!("chapter:{}:{}", translation_id, chapter_id)
}

/// Key for a search query. The limit is part of the key so a wider
/// request never serves a previously cached narrower result.
#[must_use]
pub fn search(translation_id: &str, query: &str, limit: u32) -> String {
    format!("search:{}:{}:{}", translation_id, query, limit)
}

/// Key for the provider's global verse of the day. Keyed by calendar
/// date so tomorrow's lookup always misses, independent of the TTL.
#[must_use]
pub fn verse_of_day(date: NaiveDate) -> String {
    format!("votd:{}", date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translations_key() {
        assert_eq!(translations(), "translations");
    }

    #[test]
    fn test_books_key() {
        assert_eq!(books("web"), "books:web");
    }

    #[test]
    fn test_verse_key_preserves_case() {
        assert_eq!(verse("web", "JHN.3.16"), "verse:web:JHN.3.16");
    }

    #[test]
    fn test_passage_key() {
        assert_eq!(passage("kjv", "John 3:16-17"), "passage:kjv:John 3:16-17");
    }

    #[test]
    fn test_chapter_key() {
        assert_eq!(chapter("web", "PSA.23"), "chapter:web:PSA.23");
    }

    #[test]
    fn test_search_key_includes_limit() {
        assert_eq!(search("web", "shepherd", 20), "search:web:shepherd:20");
        assert_ne!(search("web", "shepherd", 20), search("web", "shepherd", 50));
    }

    #[test]
    fn test_verse_of_day_key_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(verse_of_day(date), "votd:2025-03-14");
    }
}
