//! Verse-of-day DTOs.

use caresphere_core::validation::rules;
use caresphere_core::{UserId, VerseOfDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The verse of the day for one organization and calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerseOfDayResponse {
    pub scheduled_date: NaiveDate,
    pub reference: String,
    pub verse_text: String,
    pub translation_id: String,
    /// False when an administrator pinned this verse explicitly.
    pub is_automatic: bool,
}

impl From<VerseOfDay> for VerseOfDayResponse {
    fn from(verse: VerseOfDay) -> Self {
        Self {
            scheduled_date: verse.scheduled_date,
            reference: verse.reference,
            verse_text: verse.verse_text,
            translation_id: verse.translation_id,
            is_automatic: verse.is_automatic,
        }
    }
}

/// Request to pin a specific verse for an organization's day.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetVerseOfDayRequest {
    #[validate(custom(function = rules::not_blank, message = "Reference must not be blank"))]
    #[validate(length(max = 64, message = "Reference cannot exceed 64 characters"))]
    pub reference: String,

    /// Defaults to today when absent.
    pub scheduled_date: Option<NaiveDate>,

    pub translation_id: Option<String>,

    /// Verse text to store verbatim. When absent the text is fetched
    /// from the content provider using `reference`.
    pub verse_text: Option<String>,

    pub set_by: Option<UserId>,
}
