//! Per-organization verse of the day.
//!
//! Resolution order for one (organization, date) pair: a stored row wins
//! verbatim, whether pinned by an administrator or populated earlier.
//! Otherwise the provider's global verse for that date is fetched through
//! the shared cache and persisted for the organization, so repeated reads
//! are stable and later provider changes cannot alter a day already
//! served.

use crate::bible::BibleService;
use crate::dto::{SetVerseOfDayRequest, VerseOfDayResponse};
use async_trait::async_trait;
use caresphere_core::validation::ValidateExt;
use caresphere_core::{CareError, CareResult, OrganizationId, VerseOfDay};
use caresphere_repository::traits::{OrganizationRepository, VerseOfDayRepository};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Verse-of-day reads and administrator overrides.
#[async_trait]
pub trait VerseOfDayService: Send + Sync {
    /// Returns the verse for an organization and date (today when absent),
    /// populating it from the global verse on first access.
    async fn get_verse_of_day(
        &self,
        organization_id: OrganizationId,
        date: Option<NaiveDate>,
    ) -> CareResult<VerseOfDayResponse>;

    /// Pins a specific verse for an organization's day, replacing
    /// whatever row exists for that date.
    async fn set_verse_of_day(
        &self,
        organization_id: OrganizationId,
        request: SetVerseOfDayRequest,
    ) -> CareResult<VerseOfDayResponse>;
}

/// Default implementation over the `verse_of_day` table.
pub struct VerseOfDayServiceImpl {
    repository: Arc<dyn VerseOfDayRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    bible: Arc<dyn BibleService>,
    default_translation: String,
}

impl VerseOfDayServiceImpl {
    #[must_use]
    pub fn new(
        repository: Arc<dyn VerseOfDayRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        bible: Arc<dyn BibleService>,
        default_translation: String,
    ) -> Self {
        Self {
            repository,
            organizations,
            bible,
            default_translation,
        }
    }

    async fn ensure_organization(&self, id: OrganizationId) -> CareResult<()> {
        if self.organizations.find_by_id(id).await?.is_none() {
            return Err(CareError::not_found("Organization", id));
        }
        Ok(())
    }
}

#[async_trait]
impl VerseOfDayService for VerseOfDayServiceImpl {
    async fn get_verse_of_day(
        &self,
        organization_id: OrganizationId,
        date: Option<NaiveDate>,
    ) -> CareResult<VerseOfDayResponse> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        debug!("Getting verse of day for {} on {}", organization_id, date);

        self.ensure_organization(organization_id).await?;

        if let Some(row) = self
            .repository
            .find_by_org_and_date(organization_id, date)
            .await?
        {
            return Ok(VerseOfDayResponse::from(row));
        }

        let content = self.bible.global_verse_of_day(date, None).await?;
        let row = VerseOfDay::new_automatic(
            organization_id,
            date,
            content.reference,
            content.translation_id,
            content.text,
        );
        let stored = self.repository.upsert(&row).await?;
        info!(
            "Verse of day populated for {} on {}: {}",
            organization_id, date, stored.reference
        );

        Ok(VerseOfDayResponse::from(stored))
    }

    async fn set_verse_of_day(
        &self,
        organization_id: OrganizationId,
        request: SetVerseOfDayRequest,
    ) -> CareResult<VerseOfDayResponse> {
        request.validate_request()?;

        self.ensure_organization(organization_id).await?;
        let date = request
            .scheduled_date
            .unwrap_or_else(|| Utc::now().date_naive());
        debug!(
            "Setting verse of day for {} on {}: {}",
            organization_id, date, request.reference
        );

        let (verse_text, translation_id) = match request.verse_text {
            Some(text) => (
                text,
                request
                    .translation_id
                    .unwrap_or_else(|| self.default_translation.clone()),
            ),
            None => {
                let verse = self
                    .bible
                    .get_verse(request.translation_id.as_deref(), &request.reference)
                    .await?;
                (verse.text, verse.translation_id)
            }
        };

        let row = VerseOfDay::new_override(
            organization_id,
            date,
            request.reference,
            translation_id,
            verse_text,
            request.set_by,
        );
        let stored = self.repository.upsert(&row).await?;
        info!(
            "Verse of day pinned for {} on {}: {}",
            organization_id, date, stored.reference
        );

        Ok(VerseOfDayResponse::from(stored))
    }
}

impl std::fmt::Debug for VerseOfDayServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerseOfDayServiceImpl")
            .field("default_translation", &self.default_translation)
            .finish_non_exhaustive()
    }
}
