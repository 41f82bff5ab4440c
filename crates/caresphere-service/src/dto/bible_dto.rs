//! Bible content DTOs.
//!
//! These are the canonical shapes the rest of the system works with. The
//! provider client normalizes whatever envelope the upstream API returns
//! into these types before anything is cached, so a payload read back from
//! the cache deserializes into exactly the same shape a live fetch
//! produces.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One translation offered by the content provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Translation {
    pub id: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub language: Option<String>,
}

/// One book within a translation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub testament: Option<String>,
}

/// A single verse with its text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Verse {
    /// Provider verse identifier, e.g. `JHN.3.16`.
    pub id: String,
    /// Human-readable reference, e.g. `John 3:16`.
    pub reference: String,
    pub text: String,
    pub translation_id: String,
}

/// A contiguous range of verses resolved from a free-form reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Passage {
    pub reference: String,
    pub translation_id: String,
    pub verses: Vec<Verse>,
}

/// A full chapter. The provider returns chapter text as one block
/// rather than individual verses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Chapter {
    /// Provider chapter identifier, e.g. `PSA.23`.
    pub id: String,
    pub reference: String,
    pub content: String,
    pub verse_count: Option<u32>,
    pub translation_id: String,
}

/// Results of a text search within one translation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub query: String,
    pub total: u32,
    pub verses: Vec<Verse>,
}

/// The provider's global verse of the day, before it is persisted for
/// any particular organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerseOfDayContent {
    pub reference: String,
    pub text: String,
    pub translation_id: String,
}
