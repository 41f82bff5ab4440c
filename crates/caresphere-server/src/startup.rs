//! Server startup utilities: logging, service wiring, shutdown.

use std::sync::Arc;

use caresphere_config::{AppConfig, ServerConfig};
use caresphere_core::CareResult;
use caresphere_repository::{
    DatabasePool, PgCacheEntryRepository, PgMemberRepository, PgOrganizationRepository,
    PgSenderSettingRepository, PgVerseOfDayRepository,
};
use caresphere_rest::AppState;
use caresphere_service::{
    bible, BibleApiClient, BibleService, BibleServiceImpl, BirthdayNotificationService,
    BirthdayNotificationServiceImpl, ContentCacheService, HttpMessageDispatcher, MessageService,
    MessageServiceImpl, SenderSettingsService, SenderSettingsServiceImpl, VerseOfDayService,
    VerseOfDayServiceImpl,
};
use tokio::signal;
use tracing::info;

/// Initializes the tracing subscriber.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,caresphere=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Wires repositories and services into the REST application state.
pub fn build_state(config: &AppConfig, database: Arc<DatabasePool>) -> CareResult<AppState> {
    // Repositories
    let cache_entries = Arc::new(PgCacheEntryRepository::new(database.clone()));
    let sender_settings = Arc::new(PgSenderSettingRepository::new(database.clone()));
    let verse_rows = Arc::new(PgVerseOfDayRepository::new(database.clone()));
    let organizations = Arc::new(PgOrganizationRepository::new(database.clone()));
    let members = Arc::new(PgMemberRepository::new(database.clone()));

    // Bible content behind the cache
    let content_cache = Arc::new(ContentCacheService::new(cache_entries, bible::PROVIDER));
    let bible_client = Arc::new(BibleApiClient::new(&config.bible)?);
    let bible_service: Arc<dyn BibleService> = Arc::new(BibleServiceImpl::new(
        content_cache,
        bible_client,
        config.bible.clone(),
    ));

    // Sender settings and messaging
    let senders: Arc<dyn SenderSettingsService> = Arc::new(SenderSettingsServiceImpl::new(
        sender_settings,
        config.senders.clone(),
    ));
    let dispatcher = Arc::new(HttpMessageDispatcher::new(&config.messaging)?);
    let messages: Arc<dyn MessageService> =
        Arc::new(MessageServiceImpl::new(dispatcher, senders.clone()));

    // Verse of the day
    let verse_of_day: Arc<dyn VerseOfDayService> = Arc::new(VerseOfDayServiceImpl::new(
        verse_rows,
        organizations.clone(),
        bible_service.clone(),
        config.bible.default_translation.clone(),
    ));

    // Birthday fan-out
    let birthdays: Arc<dyn BirthdayNotificationService> = Arc::new(
        BirthdayNotificationServiceImpl::new(organizations, members, messages.clone()),
    );

    Ok(AppState::new(
        bible_service,
        senders,
        verse_of_day,
        messages,
        birthdays,
        database,
    ))
}

/// Prints server startup information.
pub fn print_startup_info(server: &ServerConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:   http://{}", server.addr());
    info!("Health:     http://{}/health", server.addr());
    info!("Swagger UI: http://{}/swagger-ui", server.addr());
    info!("{}", separator);
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
