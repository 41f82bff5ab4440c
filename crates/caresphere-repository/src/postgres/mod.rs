//! PostgreSQL repository implementations.

mod cache_entry_repository;
mod member_repository;
mod organization_repository;
mod sender_setting_repository;
mod verse_of_day_repository;

pub use cache_entry_repository::PgCacheEntryRepository;
pub use member_repository::PgMemberRepository;
pub use organization_repository::PgOrganizationRepository;
pub use sender_setting_repository::PgSenderSettingRepository;
pub use verse_of_day_repository::PgVerseOfDayRepository;
