//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the REST API.

use caresphere_core::{
    ErrorResponse, FieldError, MessageType, OrganizationId, ResolvedScope, SenderSettingId,
    SettingScope, UserId,
};
use caresphere_service::{
    BirthdayRunReport, Book, Chapter, MessageReceipt, Passage, ResolvedSenders, SearchResults,
    SendMessageRequest, SenderSettingResponse, SetVerseOfDayRequest, Translation,
    UpsertSenderSettingRequest, Verse, VerseOfDayContent, VerseOfDayResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the CareSphere API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareSphere API",
        version = "1.0.0",
        description = "Bible content, verse-of-the-day, sender settings, and messaging for CareSphere",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/", description = "This server")
    ),
    paths(
        // Bible content endpoints
        crate::controllers::bible_controller::list_translations,
        crate::controllers::bible_controller::list_books,
        crate::controllers::bible_controller::get_verse,
        crate::controllers::bible_controller::get_passage,
        crate::controllers::bible_controller::get_chapter,
        crate::controllers::bible_controller::search_verses,
        crate::controllers::bible_controller::global_verse_of_day,
        // Verse-of-the-day endpoints
        crate::controllers::votd_controller::get_verse_of_day,
        crate::controllers::votd_controller::set_verse_of_day,
        // Sender settings endpoints
        crate::controllers::sender_controller::list_settings,
        crate::controllers::sender_controller::upsert_setting,
        crate::controllers::sender_controller::resolve_senders,
        crate::controllers::sender_controller::delete_setting,
        // Messaging endpoints
        crate::controllers::message_controller::send_message,
        // Notification endpoints
        crate::controllers::notification_controller::run_birthday_notifications,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            OrganizationId,
            UserId,
            SenderSettingId,
            SettingScope,
            ResolvedScope,
            MessageType,
            ErrorResponse,
            FieldError,
            // Bible DTOs
            Translation,
            Book,
            Verse,
            Passage,
            Chapter,
            SearchResults,
            VerseOfDayContent,
            // Verse-of-the-day DTOs
            VerseOfDayResponse,
            SetVerseOfDayRequest,
            // Sender settings DTOs
            UpsertSenderSettingRequest,
            SenderSettingResponse,
            ResolvedSenders,
            // Messaging DTOs
            SendMessageRequest,
            MessageReceipt,
            // Notification DTOs
            BirthdayRunReport,
        )
    ),
    tags(
        (name = "bible", description = "Bible content endpoints"),
        (name = "verse-of-day", description = "Organization verse-of-the-day endpoints"),
        (name = "sender-settings", description = "Sender settings endpoints"),
        (name = "messages", description = "Transactional messaging endpoints"),
        (name = "notifications", description = "Notification run endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
