//! Application state shared across request handlers.

use std::sync::Arc;

use caresphere_repository::DatabasePool;
use caresphere_service::{
    BibleService, BirthdayNotificationService, MessageService, SenderSettingsService,
    VerseOfDayService,
};

/// Shared application state.
///
/// Handlers receive this via `State` extraction. Every service is held
/// behind `Arc<dyn Trait>` so tests can swap in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub bible: Arc<dyn BibleService>,
    pub senders: Arc<dyn SenderSettingsService>,
    pub verse_of_day: Arc<dyn VerseOfDayService>,
    pub messages: Arc<dyn MessageService>,
    pub birthdays: Arc<dyn BirthdayNotificationService>,
    pub database: Arc<DatabasePool>,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(
        bible: Arc<dyn BibleService>,
        senders: Arc<dyn SenderSettingsService>,
        verse_of_day: Arc<dyn VerseOfDayService>,
        messages: Arc<dyn MessageService>,
        birthdays: Arc<dyn BirthdayNotificationService>,
        database: Arc<DatabasePool>,
    ) -> Self {
        Self {
            bible,
            senders,
            verse_of_day,
            messages,
            birthdays,
            database,
        }
    }
}
