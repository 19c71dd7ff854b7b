use crate::modules::anime::domain::entities::AnimeRecord;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage port for anime records. Upserts are keyed by the record id;
/// `mal_id` carries a unique index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    async fn find_by_mal_id(&self, mal_id: i32) -> AppResult<Option<AnimeRecord>>;
    async fn save_batch(&self, records: &[AnimeRecord]) -> AppResult<()>;
    /// Deleting an id that is already gone is a no-op.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
