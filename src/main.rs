use std::sync::Arc;

use mal_notify::infrastructure::memory::{
    InMemoryAnimeStore, InMemorySubscriberStore, InMemoryTrackedAccountStore,
};
use mal_notify::modules::anime::domain::repositories::AnimeRepository;
use mal_notify::modules::notify::application::dispatcher::NotificationDispatcher;
use mal_notify::modules::notify::domain::messenger::ChangeMessenger;
use mal_notify::modules::notify::domain::notifier::AnimeNotifier;
use mal_notify::modules::notify::infrastructure::discord::DiscordMessenger;
use mal_notify::modules::subscription::domain::repositories::{
    SubscriberRepository, TrackedAccountRepository,
};
use mal_notify::modules::sync::application::cleanup::CleanupService;
use mal_notify::modules::sync::application::engine::SyncEngine;
use mal_notify::modules::sync::application::scheduler::SyncScheduler;
use mal_notify::modules::watchlist::domain::source::WatchListSource;
use mal_notify::modules::watchlist::infrastructure::mal::MalClient;
use mal_notify::shared::{utils::logger, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();
    let config = Config::from_env()?;
    log::info!("mal-notify {}", env!("CARGO_PKG_VERSION"));

    let account_repo: Arc<dyn TrackedAccountRepository> =
        Arc::new(InMemoryTrackedAccountStore::new());
    let subscriber_repo: Arc<dyn SubscriberRepository> = Arc::new(InMemorySubscriberStore::new());
    let anime_repo: Arc<dyn AnimeRepository> = Arc::new(InMemoryAnimeStore::new());

    let source: Arc<dyn WatchListSource> = Arc::new(MalClient::new(config.mal_client_id)?);
    let messenger: Arc<dyn ChangeMessenger> =
        Arc::new(DiscordMessenger::new(config.discord_bot_token)?);

    let cleanup = Arc::new(CleanupService::new(
        Arc::clone(&account_repo),
        Arc::clone(&subscriber_repo),
        Arc::clone(&anime_repo),
    ));
    let notifier: Arc<dyn AnimeNotifier> = Arc::new(NotificationDispatcher::new(
        Arc::clone(&account_repo),
        Arc::clone(&subscriber_repo),
        messenger,
    ));
    let engine = Arc::new(SyncEngine::new(
        account_repo,
        anime_repo,
        source,
        cleanup,
        notifier,
    ));

    let scheduler = SyncScheduler::new(engine, config.sync_interval);
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    log::info!("Received shutdown signal, stopping ..");
    scheduler.shutdown();
    scheduler.join().await;

    Ok(())
}
