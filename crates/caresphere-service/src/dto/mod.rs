//! Data transfer objects.

pub mod bible_dto;
pub mod message_dto;
pub mod sender_dto;
pub mod votd_dto;

pub use bible_dto::{
    Book, Chapter, Passage, SearchResults, Translation, Verse, VerseOfDayContent,
};
pub use message_dto::{MessageReceipt, SendMessageRequest};
pub use sender_dto::{ResolvedSenders, SenderSettingResponse, UpsertSenderSettingRequest};
pub use votd_dto::{SetVerseOfDayRequest, VerseOfDayResponse};
