use crate::modules::subscription::domain::entities::Subscriber;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage port for subscribers. `recipient_id` carries a unique index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_recipient(&self, recipient_id: &str) -> AppResult<Option<Subscriber>>;
    async fn save(&self, subscriber: &Subscriber) -> AppResult<()>;
    /// Deleting an id that is already gone is a no-op.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Does any subscriber's reference set contain this account id?
    async fn exists_referencing_account(&self, account_id: Uuid) -> AppResult<bool>;
    async fn find_subscribed_to_accounts(&self, account_ids: &[Uuid]) -> AppResult<Vec<Subscriber>>;
}
