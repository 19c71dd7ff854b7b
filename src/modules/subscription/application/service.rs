use std::sync::Arc;

use crate::modules::subscription::domain::entities::{Subscriber, TrackedAccount};
use crate::modules::subscription::domain::repositories::{
    SubscriberRepository, TrackedAccountRepository,
};
use crate::modules::sync::application::cleanup::CleanupService;
use crate::modules::watchlist::domain::source::WatchListSource;
use crate::shared::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
    /// The external account does not exist. A defined outcome, not an error.
    AccountNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    NotSubscribed,
}

/// Command-facing surface: wires recipients to tracked accounts and
/// hands unreferenced accounts to cleanup.
pub struct SubscriptionService {
    account_repo: Arc<dyn TrackedAccountRepository>,
    subscriber_repo: Arc<dyn SubscriberRepository>,
    source: Arc<dyn WatchListSource>,
    cleanup: Arc<CleanupService>,
}

impl SubscriptionService {
    pub fn new(
        account_repo: Arc<dyn TrackedAccountRepository>,
        subscriber_repo: Arc<dyn SubscriberRepository>,
        source: Arc<dyn WatchListSource>,
        cleanup: Arc<CleanupService>,
    ) -> Self {
        Self {
            account_repo,
            subscriber_repo,
            source,
            cleanup,
        }
    }

    pub async fn subscribe(
        &self,
        recipient_id: &str,
        username: &str,
    ) -> AppResult<SubscribeOutcome> {
        let mut subscriber = match self.subscriber_repo.find_by_recipient(recipient_id).await? {
            Some(subscriber) => subscriber,
            None => Subscriber::new(recipient_id),
        };

        let account = match self.account_repo.find_by_username(username).await? {
            Some(account) => account,
            None => {
                // Only start tracking accounts the source actually knows.
                if !self.source.exists(username).await? {
                    return Ok(SubscribeOutcome::AccountNotFound);
                }
                let account = TrackedAccount::new(username);
                self.account_repo.save(&account).await?;
                account
            }
        };

        if !subscriber.subscribe_to(account.id) {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
        self.subscriber_repo.save(&subscriber).await?;

        log::info!("{} subscribed to '{}'", recipient_id, username);
        Ok(SubscribeOutcome::Subscribed)
    }

    pub async fn unsubscribe(
        &self,
        recipient_id: &str,
        username: &str,
    ) -> AppResult<UnsubscribeOutcome> {
        let Some(mut subscriber) = self.subscriber_repo.find_by_recipient(recipient_id).await?
        else {
            return Ok(UnsubscribeOutcome::NotSubscribed);
        };
        let Some(account) = self.account_repo.find_by_username(username).await? else {
            return Ok(UnsubscribeOutcome::NotSubscribed);
        };

        let removed = subscriber.unsubscribe_from(account.id);
        if subscriber.has_subscriptions() {
            self.subscriber_repo.save(&subscriber).await?;
        } else {
            // A subscriber without subscriptions carries no information.
            self.subscriber_repo.delete(subscriber.id).await?;
        }

        self.cleanup.cleanup_account_if_unused(&account).await?;

        if removed {
            log::info!("{} unsubscribed from '{}'", recipient_id, username);
            Ok(UnsubscribeOutcome::Unsubscribed)
        } else {
            Ok(UnsubscribeOutcome::NotSubscribed)
        }
    }
}
