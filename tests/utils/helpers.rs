/// Shared wiring for integration tests: in-memory stores, a scriptable
/// watch-list source and a recording messenger, assembled into the same
/// object graph the daemon builds.
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use mal_notify::infrastructure::memory::{
    InMemoryAnimeStore, InMemorySubscriberStore, InMemoryTrackedAccountStore,
};
use mal_notify::modules::anime::domain::entities::AnimeRecord;
use mal_notify::modules::notify::application::dispatcher::NotificationDispatcher;
use mal_notify::modules::notify::domain::messenger::ChangeMessenger;
use mal_notify::modules::subscription::application::service::SubscriptionService;
use mal_notify::modules::sync::application::cleanup::CleanupService;
use mal_notify::modules::sync::application::engine::SyncEngine;
use mal_notify::modules::watchlist::domain::source::{WatchListSource, WatchListTitle};
use mal_notify::shared::errors::{AppError, AppResult};

/// Watch-list source backed by a scriptable map of username -> titles.
#[derive(Default)]
pub struct StaticWatchListSource {
    lists: Mutex<HashMap<String, Vec<WatchListTitle>>>,
}

impl StaticWatchListSource {
    pub fn set_list(&self, username: &str, titles: Vec<WatchListTitle>) {
        self.lists
            .lock()
            .unwrap()
            .insert(username.to_string(), titles);
    }

    pub fn remove_account(&self, username: &str) {
        self.lists.lock().unwrap().remove(username);
    }
}

#[async_trait]
impl WatchListSource for StaticWatchListSource {
    async fn plan_to_watch(&self, username: &str) -> AppResult<Vec<WatchListTitle>> {
        self.lists
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Account '{}' not found", username)))
    }

    async fn exists(&self, username: &str) -> AppResult<bool> {
        Ok(self.lists.lock().unwrap().contains_key(username))
    }
}

/// Messenger that records every delivery and can be told to fail for
/// specific recipients.
#[derive(Default)]
pub struct RecordingMessenger {
    deliveries: Mutex<Vec<(String, i32)>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingMessenger {
    pub fn fail_for(&self, recipient_id: &str) {
        self.failing.lock().unwrap().insert(recipient_id.to_string());
    }

    pub fn deliveries(&self) -> Vec<(String, i32)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChangeMessenger for RecordingMessenger {
    async fn deliver(&self, recipient_id: &str, record: &AnimeRecord) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(recipient_id) {
            return Err(AppError::ApiError(format!(
                "Delivery to {} refused",
                recipient_id
            )));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), record.mal_id));
        Ok(())
    }
}

pub struct TestServices {
    pub accounts: Arc<InMemoryTrackedAccountStore>,
    pub subscribers: Arc<InMemorySubscriberStore>,
    pub anime: Arc<InMemoryAnimeStore>,
    pub source: Arc<StaticWatchListSource>,
    pub messenger: Arc<RecordingMessenger>,
    pub subscriptions: SubscriptionService,
    pub engine: SyncEngine,
}

pub fn build_test_services() -> TestServices {
    let accounts = Arc::new(InMemoryTrackedAccountStore::new());
    let subscribers = Arc::new(InMemorySubscriberStore::new());
    let anime = Arc::new(InMemoryAnimeStore::new());
    let source = Arc::new(StaticWatchListSource::default());
    let messenger = Arc::new(RecordingMessenger::default());

    let cleanup = Arc::new(CleanupService::new(
        accounts.clone(),
        subscribers.clone(),
        anime.clone(),
    ));
    let subscriptions = SubscriptionService::new(
        accounts.clone(),
        subscribers.clone(),
        source.clone(),
        cleanup.clone(),
    );
    let notifier = Arc::new(NotificationDispatcher::new(
        accounts.clone(),
        subscribers.clone(),
        messenger.clone(),
    ));
    let engine = SyncEngine::new(
        accounts.clone(),
        anime.clone(),
        source.clone(),
        cleanup,
        notifier,
    );

    TestServices {
        accounts,
        subscribers,
        anime,
        source,
        messenger,
        subscriptions,
        engine,
    }
}
