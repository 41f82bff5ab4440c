//! Repository trait definitions.

use async_trait::async_trait;
use caresphere_core::{
    CacheEntry, CareResult, Member, Organization, OrganizationId, SenderSetting, SenderSettingId,
    SettingScope, VerseOfDay,
};
use chrono::NaiveDate;
use uuid::Uuid;

/// Provider payload cache repository trait.
#[async_trait]
pub trait CacheEntryRepository: Send + Sync {
    /// Finds a cache entry by its key, fresh or stale.
    async fn find_by_key(&self, cache_key: &str) -> CareResult<Option<CacheEntry>>;

    /// Inserts a new entry or replaces the existing row for the same key.
    ///
    /// Replacement is unconditional (last writer wins) and resets the hit
    /// counter.
    async fn upsert(&self, entry: &CacheEntry) -> CareResult<CacheEntry>;

    /// Increments the hit counter for a key.
    async fn increment_hit_count(&self, cache_key: &str) -> CareResult<()>;
}

/// Sender setting repository trait.
#[async_trait]
pub trait SenderSettingRepository: Send + Sync {
    /// Finds the row for one `(scope, reference_id)` pair. The GLOBAL row
    /// is addressed with a `None` reference.
    async fn find_by_scope(
        &self,
        scope: SettingScope,
        reference_id: Option<Uuid>,
    ) -> CareResult<Option<SenderSetting>>;

    /// Inserts a new row or replaces the existing one for the same
    /// `(scope, reference_id)` pair.
    async fn upsert(&self, setting: &SenderSetting) -> CareResult<SenderSetting>;

    /// Lists all stored sender settings.
    async fn list(&self) -> CareResult<Vec<SenderSetting>>;

    /// Deletes a row by ID.
    async fn delete(&self, id: SenderSettingId) -> CareResult<bool>;
}

/// Verse-of-day repository trait.
#[async_trait]
pub trait VerseOfDayRepository: Send + Sync {
    /// Finds an organization's verse row for one calendar day.
    async fn find_by_org_and_date(
        &self,
        organization_id: OrganizationId,
        date: NaiveDate,
    ) -> CareResult<Option<VerseOfDay>>;

    /// Inserts a new row or replaces the existing one for the same
    /// `(organization_id, scheduled_date)` pair.
    async fn upsert(&self, verse: &VerseOfDay) -> CareResult<VerseOfDay>;
}

/// Member repository trait.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Finds active members of an organization whose birthday falls on the
    /// month and day of `date`.
    async fn find_active_with_birthday(
        &self,
        organization_id: OrganizationId,
        date: NaiveDate,
    ) -> CareResult<Vec<Member>>;
}

/// Organization repository trait.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Finds an organization by ID.
    async fn find_by_id(&self, id: OrganizationId) -> CareResult<Option<Organization>>;

    /// Lists all active organizations in creation order.
    async fn list_active(&self) -> CareResult<Vec<Organization>>;
}
