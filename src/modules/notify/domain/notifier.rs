use async_trait::async_trait;

use crate::modules::anime::domain::entities::AnimeRecord;

/// Consumer of change events produced by the sync engine.
///
/// Implementations own their failure handling; the engine treats
/// notification as fire-and-forget and never sees delivery errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimeNotifier: Send + Sync {
    async fn on_anime_changed(&self, record: &AnimeRecord);
}
