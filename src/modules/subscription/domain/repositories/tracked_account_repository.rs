use crate::modules::subscription::domain::entities::TrackedAccount;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage port for tracked accounts. `username` carries a unique index;
/// the reference-set containment queries back both cleanup and recipient
/// resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackedAccountRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<TrackedAccount>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<TrackedAccount>>;
    async fn save(&self, account: &TrackedAccount) -> AppResult<()>;
    async fn save_batch(&self, accounts: &[TrackedAccount]) -> AppResult<()>;
    /// Deleting an id that is already gone is a no-op.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Does any account's reference set contain this anime id?
    async fn exists_referencing_anime(&self, anime_id: Uuid) -> AppResult<bool>;
    async fn find_referencing_anime(&self, anime_id: Uuid) -> AppResult<Vec<TrackedAccount>>;
}
