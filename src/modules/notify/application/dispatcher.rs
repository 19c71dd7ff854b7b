use async_trait::async_trait;
use futures::future;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::anime::domain::entities::AnimeRecord;
use crate::modules::notify::domain::{messenger::ChangeMessenger, notifier::AnimeNotifier};
use crate::modules::subscription::domain::repositories::{
    SubscriberRepository, TrackedAccountRepository,
};
use crate::shared::errors::AppResult;

/// Fans one change event out to every entitled recipient. A recipient is
/// entitled iff at least one of its subscribed accounts currently
/// references the record.
pub struct NotificationDispatcher {
    account_repo: Arc<dyn TrackedAccountRepository>,
    subscriber_repo: Arc<dyn SubscriberRepository>,
    messenger: Arc<dyn ChangeMessenger>,
}

impl NotificationDispatcher {
    pub fn new(
        account_repo: Arc<dyn TrackedAccountRepository>,
        subscriber_repo: Arc<dyn SubscriberRepository>,
        messenger: Arc<dyn ChangeMessenger>,
    ) -> Self {
        Self {
            account_repo,
            subscriber_repo,
            messenger,
        }
    }

    async fn resolve_recipients(&self, record: &AnimeRecord) -> AppResult<Vec<String>> {
        let accounts = self.account_repo.find_referencing_anime(record.id).await?;
        if accounts.is_empty() {
            return Ok(Vec::new());
        }

        let account_ids: Vec<Uuid> = accounts.iter().map(|account| account.id).collect();
        let subscribers = self
            .subscriber_repo
            .find_subscribed_to_accounts(&account_ids)
            .await?;

        let mut seen = HashSet::new();
        Ok(subscribers
            .into_iter()
            .filter(|subscriber| seen.insert(subscriber.recipient_id.clone()))
            .map(|subscriber| subscriber.recipient_id)
            .collect())
    }
}

#[async_trait]
impl AnimeNotifier for NotificationDispatcher {
    async fn on_anime_changed(&self, record: &AnimeRecord) {
        let recipients = match self.resolve_recipients(record).await {
            Ok(recipients) => recipients,
            Err(err) => {
                log::error!(
                    "Failed to resolve recipients for '{}': {}",
                    record.title,
                    err
                );
                return;
            }
        };
        if recipients.is_empty() {
            return;
        }

        log::info!(
            "Notifying {} subscriber(s) about '{}'",
            recipients.len(),
            record.title
        );

        let deliveries = recipients.iter().map(|recipient_id| async move {
            (
                recipient_id,
                self.messenger.deliver(recipient_id, record).await,
            )
        });
        for (recipient_id, result) in future::join_all(deliveries).await {
            if let Err(err) = result {
                log::error!("Failed to notify {}: {}", recipient_id, err);
            }
        }
    }
}
