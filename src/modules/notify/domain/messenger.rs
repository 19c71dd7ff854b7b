use async_trait::async_trait;

use crate::modules::anime::domain::entities::AnimeRecord;
use crate::shared::errors::AppResult;

/// Outbound messaging channel: delivers one change message to one
/// recipient. Rendering is the implementation's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeMessenger: Send + Sync {
    async fn deliver(&self, recipient_id: &str, record: &AnimeRecord) -> AppResult<()>;
}
