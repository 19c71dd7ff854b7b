use futures::future;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::anime::domain::repositories::AnimeRepository;
use crate::modules::subscription::domain::entities::TrackedAccount;
use crate::modules::subscription::domain::repositories::{
    SubscriberRepository, TrackedAccountRepository,
};
use crate::shared::errors::AppResult;

/// Reference-counted garbage collection for tracked accounts and anime
/// records. Reference checks are live containment queries, so redundant
/// or concurrent calls stay harmless: deleting an id that is already gone
/// is a no-op.
///
/// The check and the delete are not atomic against a subscribe landing in
/// between; a record lost that way is re-created from the source on the
/// next sync cycle.
pub struct CleanupService {
    account_repo: Arc<dyn TrackedAccountRepository>,
    subscriber_repo: Arc<dyn SubscriberRepository>,
    anime_repo: Arc<dyn AnimeRepository>,
}

impl CleanupService {
    pub fn new(
        account_repo: Arc<dyn TrackedAccountRepository>,
        subscriber_repo: Arc<dyn SubscriberRepository>,
        anime_repo: Arc<dyn AnimeRepository>,
    ) -> Self {
        Self {
            account_repo,
            subscriber_repo,
            anime_repo,
        }
    }

    /// Delete the account when no subscriber references it, then try to
    /// collect every anime record it referenced. A failed anime cleanup is
    /// logged and does not abort the rest of the cascade.
    pub async fn cleanup_account_if_unused(&self, account: &TrackedAccount) -> AppResult<()> {
        if self
            .subscriber_repo
            .exists_referencing_account(account.id)
            .await?
        {
            return Ok(());
        }

        self.account_repo.delete(account.id).await?;
        log::info!("Removed unreferenced account '{}'", account.username);

        let anime_ids: Vec<Uuid> = account.plan_to_watch.iter().copied().collect();
        let results =
            future::join_all(anime_ids.iter().map(|id| self.cleanup_anime_if_unused(*id))).await;
        for (anime_id, result) in anime_ids.iter().zip(results) {
            if let Err(err) = result {
                log::error!("Cleanup failed for anime {}: {}", anime_id, err);
            }
        }

        Ok(())
    }

    /// Delete the anime record when no tracked account references it.
    pub async fn cleanup_anime_if_unused(&self, anime_id: Uuid) -> AppResult<()> {
        if self
            .account_repo
            .exists_referencing_anime(anime_id)
            .await?
        {
            return Ok(());
        }

        self.anime_repo.delete(anime_id).await
    }
}
