//! # CareSphere Service
//!
//! Business logic service layer for the CareSphere content service.
//! Bible content resolution, sender settings, verse of the day,
//! transactional messaging, and birthday notifications.

pub mod bible;
pub mod cache_keys;
pub mod content_cache;
pub mod dto;
pub mod messaging;
pub mod notifications;
pub mod senders;
pub mod votd;

pub use bible::{BibleApiClient, BibleProvider, BibleService, BibleServiceImpl};
pub use content_cache::ContentCacheService;
pub use dto::*;
pub use messaging::{
    HttpMessageDispatcher, MessageDispatcher, MessageService, MessageServiceImpl, OutboundMessage,
};
pub use notifications::{
    BirthdayNotificationService, BirthdayNotificationServiceImpl, BirthdayRunReport,
};
pub use senders::{SenderSettingsService, SenderSettingsServiceImpl};
pub use votd::{VerseOfDayService, VerseOfDayServiceImpl};
