use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::modules::subscription::domain::entities::{Subscriber, TrackedAccount};
use crate::modules::subscription::domain::repositories::{
    SubscriberRepository, TrackedAccountRepository,
};
use crate::shared::errors::{AppError, AppResult};

/// Process-local tracked-account store with a unique index on `username`.
#[derive(Default)]
pub struct InMemoryTrackedAccountStore {
    accounts: DashMap<Uuid, TrackedAccount>,
}

impl InMemoryTrackedAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique_username(&self, account: &TrackedAccount) -> AppResult<()> {
        let duplicate = self.accounts.iter().any(|entry| {
            entry.value().username == account.username && *entry.key() != account.id
        });
        if duplicate {
            return Err(AppError::StorageError(format!(
                "Duplicate username '{}'",
                account.username
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TrackedAccountRepository for InMemoryTrackedAccountStore {
    async fn find_all(&self) -> AppResult<Vec<TrackedAccount>> {
        Ok(self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<TrackedAccount>> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, account: &TrackedAccount) -> AppResult<()> {
        self.check_unique_username(account)?;
        self.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn save_batch(&self, accounts: &[TrackedAccount]) -> AppResult<()> {
        for account in accounts {
            self.save(account).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.accounts.remove(&id);
        Ok(())
    }

    async fn exists_referencing_anime(&self, anime_id: Uuid) -> AppResult<bool> {
        Ok(self
            .accounts
            .iter()
            .any(|entry| entry.value().references(anime_id)))
    }

    async fn find_referencing_anime(&self, anime_id: Uuid) -> AppResult<Vec<TrackedAccount>> {
        Ok(self
            .accounts
            .iter()
            .filter(|entry| entry.value().references(anime_id))
            .map(|entry| entry.value().clone())
            .collect())
    }
}

/// Process-local subscriber store with a unique index on `recipient_id`.
#[derive(Default)]
pub struct InMemorySubscriberStore {
    subscribers: DashMap<Uuid, Subscriber>,
}

impl InMemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberStore {
    async fn find_by_recipient(&self, recipient_id: &str) -> AppResult<Option<Subscriber>> {
        Ok(self
            .subscribers
            .iter()
            .find(|entry| entry.value().recipient_id == recipient_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, subscriber: &Subscriber) -> AppResult<()> {
        let duplicate = self.subscribers.iter().any(|entry| {
            entry.value().recipient_id == subscriber.recipient_id && *entry.key() != subscriber.id
        });
        if duplicate {
            return Err(AppError::StorageError(format!(
                "Duplicate recipient id '{}'",
                subscriber.recipient_id
            )));
        }
        self.subscribers.insert(subscriber.id, subscriber.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.subscribers.remove(&id);
        Ok(())
    }

    async fn exists_referencing_account(&self, account_id: Uuid) -> AppResult<bool> {
        Ok(self
            .subscribers
            .iter()
            .any(|entry| entry.value().subscribed_accounts.contains(&account_id)))
    }

    async fn find_subscribed_to_accounts(&self, account_ids: &[Uuid]) -> AppResult<Vec<Subscriber>> {
        Ok(self
            .subscribers
            .iter()
            .filter(|entry| {
                account_ids
                    .iter()
                    .any(|id| entry.value().subscribed_accounts.contains(id))
            })
            .map(|entry| entry.value().clone())
            .collect())
    }
}
