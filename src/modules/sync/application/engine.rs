use futures::future;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::anime::domain::entities::AnimeRecord;
use crate::modules::anime::domain::repositories::AnimeRepository;
use crate::modules::notify::domain::notifier::AnimeNotifier;
use crate::modules::subscription::domain::entities::TrackedAccount;
use crate::modules::subscription::domain::repositories::TrackedAccountRepository;
use crate::modules::sync::application::cleanup::CleanupService;
use crate::modules::sync::application::reconciler::{AnimeReconciler, ReconcileOutcome};
use crate::modules::watchlist::domain::source::WatchListSource;
use crate::shared::errors::{AppError, AppResult};

struct AccountSyncResult {
    outcomes: Vec<ReconcileOutcome>,
    removed_anime_ids: Vec<Uuid>,
}

/// Orchestrates one reconciliation cycle across every tracked account.
///
/// Accounts are fetched sequentially to bound load on the external
/// source; everything downstream of a fetch (title reconciliation,
/// cleanup, notification) fans out.
pub struct SyncEngine {
    account_repo: Arc<dyn TrackedAccountRepository>,
    anime_repo: Arc<dyn AnimeRepository>,
    source: Arc<dyn WatchListSource>,
    reconciler: AnimeReconciler,
    cleanup: Arc<CleanupService>,
    notifier: Arc<dyn AnimeNotifier>,
}

impl SyncEngine {
    pub fn new(
        account_repo: Arc<dyn TrackedAccountRepository>,
        anime_repo: Arc<dyn AnimeRepository>,
        source: Arc<dyn WatchListSource>,
        cleanup: Arc<CleanupService>,
        notifier: Arc<dyn AnimeNotifier>,
    ) -> Self {
        let reconciler = AnimeReconciler::new(Arc::clone(&anime_repo));
        Self {
            account_repo,
            anime_repo,
            source,
            reconciler,
            cleanup,
            notifier,
        }
    }

    /// Run one full cycle: sync every account, then notify about every
    /// record whose status or end date changed. Each changed record is
    /// reported once, even when several accounts list it.
    pub async fn detect_changes(&self) -> AppResult<()> {
        let outcomes = self.sync().await?;

        let mut seen = HashSet::new();
        let changed: Vec<&AnimeRecord> = outcomes
            .iter()
            .filter(|outcome| outcome.has_changes())
            .filter(|outcome| seen.insert(outcome.record.mal_id))
            .map(|outcome| &outcome.record)
            .collect();
        if changed.is_empty() {
            return Ok(());
        }

        log::info!("{} anime changed status or end date", changed.len());
        future::join_all(
            changed
                .iter()
                .map(|record| self.notifier.on_anime_changed(record)),
        )
        .await;

        Ok(())
    }

    /// Reconcile all tracked accounts against the source and persist the
    /// results in batch. Returns every per-title outcome for the caller
    /// to inspect.
    pub async fn sync(&self) -> AppResult<Vec<ReconcileOutcome>> {
        let accounts = self.account_repo.find_all().await?;
        log::debug!("Syncing {} tracked account(s)", accounts.len());

        // Records reconciled earlier in this cycle, by mal_id. Later
        // accounts listing the same title must reuse the same record
        // instead of re-diffing against state that is only persisted
        // after the loop.
        let mut cycle_records: HashMap<i32, AnimeRecord> = HashMap::new();
        let mut synced_accounts = Vec::new();
        let mut outcomes = Vec::new();
        let mut removed_anime_ids = Vec::new();

        for mut account in accounts {
            match self.sync_account(&mut account, &mut cycle_records).await {
                Ok(result) => {
                    outcomes.extend(result.outcomes);
                    removed_anime_ids.extend(result.removed_anime_ids);
                    synced_accounts.push(account);
                }
                // A broken store fails the whole cycle; the next tick retries.
                Err(err @ AppError::StorageError(_)) => return Err(err),
                Err(err) => {
                    log::error!(
                        "Skipping account '{}' this cycle: {}",
                        account.username,
                        err
                    );
                }
            }
        }

        self.account_repo.save_batch(&synced_accounts).await?;
        let records: Vec<AnimeRecord> = cycle_records.into_values().collect();
        self.anime_repo.save_batch(&records).await?;

        let removed: Vec<Uuid> = removed_anime_ids
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let results = future::join_all(
            removed
                .iter()
                .map(|id| self.cleanup.cleanup_anime_if_unused(*id)),
        )
        .await;
        for (anime_id, result) in removed.iter().zip(results) {
            if let Err(err) = result {
                log::error!("Cleanup failed for removed anime {}: {}", anime_id, err);
            }
        }

        Ok(outcomes)
    }

    /// Fetch and reconcile a single account. The account's reference set
    /// is only replaced once the whole fetch succeeded; on error it is
    /// left untouched.
    async fn sync_account(
        &self,
        account: &mut TrackedAccount,
        cycle_records: &mut HashMap<i32, AnimeRecord>,
    ) -> AppResult<AccountSyncResult> {
        let titles = self.source.plan_to_watch(&account.username).await?;

        let (seen_this_cycle, fresh): (Vec<_>, Vec<_>) = titles
            .into_iter()
            .partition(|title| cycle_records.contains_key(&title.mal_id));

        // Titles another account already reconciled this cycle reuse the
        // same record; their changes were reported on first sight.
        let mut outcomes: Vec<ReconcileOutcome> = seen_this_cycle
            .iter()
            .map(|title| ReconcileOutcome {
                record: cycle_records[&title.mal_id].clone(),
                status_changed: false,
                end_date_changed: false,
            })
            .collect();

        let fresh_outcomes = future::join_all(
            fresh
                .iter()
                .map(|title| self.reconciler.reconcile(title)),
        )
        .await
        .into_iter()
        .collect::<AppResult<Vec<_>>>()?;
        for outcome in &fresh_outcomes {
            cycle_records.insert(outcome.record.mal_id, outcome.record.clone());
        }
        outcomes.extend(fresh_outcomes);

        let new_references: HashSet<Uuid> =
            outcomes.iter().map(|outcome| outcome.record.id).collect();
        let removed_anime_ids = account.replace_references(new_references);

        Ok(AccountSyncResult {
            outcomes,
            removed_anime_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{
        InMemoryAnimeStore, InMemorySubscriberStore, InMemoryTrackedAccountStore,
    };
    use crate::modules::anime::domain::value_objects::AiringStatus;
    use crate::modules::notify::domain::notifier::MockAnimeNotifier;
    use crate::modules::subscription::domain::entities::Subscriber;
    use crate::modules::subscription::domain::repositories::SubscriberRepository;
    use crate::modules::watchlist::domain::source::{MockWatchListSource, WatchListTitle};
    use chrono::NaiveDate;

    fn title(mal_id: i32, name: &str, status: AiringStatus) -> WatchListTitle {
        WatchListTitle {
            mal_id,
            title: name.to_string(),
            title_english: None,
            picture_large: None,
            picture_medium: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 9),
            end_date: None,
            status,
            episodes: 12,
        }
    }

    struct Fixture {
        accounts: Arc<InMemoryTrackedAccountStore>,
        subscribers: Arc<InMemorySubscriberStore>,
        anime: Arc<InMemoryAnimeStore>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                accounts: Arc::new(InMemoryTrackedAccountStore::new()),
                subscribers: Arc::new(InMemorySubscriberStore::new()),
                anime: Arc::new(InMemoryAnimeStore::new()),
            }
        }

        async fn track(&self, username: &str, recipient_id: &str) -> TrackedAccount {
            let account = TrackedAccount::new(username);
            self.accounts.save(&account).await.unwrap();
            let mut subscriber = Subscriber::new(recipient_id);
            subscriber.subscribe_to(account.id);
            self.subscribers.save(&subscriber).await.unwrap();
            account
        }

        fn engine(
            &self,
            source: MockWatchListSource,
            notifier: MockAnimeNotifier,
        ) -> SyncEngine {
            let cleanup = Arc::new(CleanupService::new(
                self.accounts.clone(),
                self.subscribers.clone(),
                self.anime.clone(),
            ));
            SyncEngine::new(
                self.accounts.clone(),
                self.anime.clone(),
                Arc::new(source),
                cleanup,
                Arc::new(notifier),
            )
        }
    }

    #[tokio::test]
    async fn test_first_sync_creates_records_without_notifying() {
        let fixture = Fixture::new();
        fixture.track("alice", "100").await;

        let mut source = MockWatchListSource::new();
        source.expect_plan_to_watch().returning(|_| {
            Ok(vec![
                title(1, "A", AiringStatus::NotYetAired),
                title(2, "B", AiringStatus::CurrentlyAiring),
            ])
        });
        let mut notifier = MockAnimeNotifier::new();
        notifier.expect_on_anime_changed().never();

        let engine = fixture.engine(source, notifier);
        engine.detect_changes().await.unwrap();

        let account = fixture
            .accounts
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.plan_to_watch.len(), 2);
        assert!(fixture.anime.find_by_mal_id(1).await.unwrap().is_some());
        assert!(fixture.anime.find_by_mal_id(2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_second_sync_with_no_source_changes_is_idempotent() {
        let fixture = Fixture::new();
        fixture.track("alice", "100").await;

        let mut source = MockWatchListSource::new();
        source
            .expect_plan_to_watch()
            .returning(|_| Ok(vec![title(1, "A", AiringStatus::CurrentlyAiring)]));

        let engine = fixture.engine(source, MockAnimeNotifier::new());
        engine.sync().await.unwrap();
        let outcomes = engine.sync().await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].has_changes());
    }

    #[tokio::test]
    async fn test_status_change_notifies_and_removed_title_is_collected() {
        let fixture = Fixture::new();
        fixture.track("alice", "100").await;

        // Cycle 1: A and B on the list.
        let mut source = MockWatchListSource::new();
        source.expect_plan_to_watch().returning(|_| {
            Ok(vec![
                title(1, "A", AiringStatus::NotYetAired),
                title(2, "B", AiringStatus::CurrentlyAiring),
            ])
        });
        let engine = fixture.engine(source, MockAnimeNotifier::new());
        engine.detect_changes().await.unwrap();
        let removed_id = fixture.anime.find_by_mal_id(1).await.unwrap().unwrap().id;

        // Cycle 2: only B, now finished.
        let mut source = MockWatchListSource::new();
        source
            .expect_plan_to_watch()
            .returning(|_| Ok(vec![title(2, "B", AiringStatus::FinishedAiring)]));
        let mut notifier = MockAnimeNotifier::new();
        notifier
            .expect_on_anime_changed()
            .withf(|record| record.mal_id == 2)
            .times(1)
            .return_const(());

        let engine = fixture.engine(source, notifier);
        engine.detect_changes().await.unwrap();

        // A was only referenced by alice, so it is gone.
        assert!(fixture.anime.find_by_mal_id(1).await.unwrap().is_none());
        assert!(!fixture
            .accounts
            .exists_referencing_anime(removed_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_failed_account_is_skipped_and_others_survive() {
        let fixture = Fixture::new();
        let alice = fixture.track("alice", "100").await;
        fixture.track("bob", "200").await;

        let mut source = MockWatchListSource::new();
        source
            .expect_plan_to_watch()
            .withf(|username| username == "alice")
            .returning(|_| {
                Err(AppError::ExternalServiceError(
                    "connection reset".to_string(),
                ))
            });
        source
            .expect_plan_to_watch()
            .withf(|username| username == "bob")
            .returning(|_| Ok(vec![title(3, "C", AiringStatus::CurrentlyAiring)]));

        // Seed alice with a pre-existing reference that must survive the
        // failed fetch.
        let seeded = AnimeRecord::new(crate::modules::anime::domain::entities::AnimeFields {
            mal_id: 9,
            title: "Seeded".to_string(),
            title_english: None,
            image_url: None,
            start_date: None,
            end_date: None,
            status: AiringStatus::CurrentlyAiring,
            episodes: 1,
        });
        fixture.anime.save_batch(&[seeded.clone()]).await.unwrap();
        let mut alice = alice;
        alice.plan_to_watch.insert(seeded.id);
        fixture.accounts.save(&alice).await.unwrap();

        let engine = fixture.engine(source, MockAnimeNotifier::new());
        let outcomes = engine.sync().await.unwrap();

        // Only bob's title reconciled; alice's reference set is untouched.
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].record.mal_id, 3);
        let alice = fixture
            .accounts
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert!(alice.plan_to_watch.contains(&seeded.id));
        assert!(fixture.anime.find_by_mal_id(9).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_shared_title_across_accounts_notifies_once() {
        let fixture = Fixture::new();
        fixture.track("alice", "100").await;
        fixture.track("bob", "200").await;

        // Cycle 1 creates the shared record.
        let mut source = MockWatchListSource::new();
        source
            .expect_plan_to_watch()
            .returning(|_| Ok(vec![title(7, "Shared", AiringStatus::CurrentlyAiring)]));
        let engine = fixture.engine(source, MockAnimeNotifier::new());
        engine.detect_changes().await.unwrap();

        // Cycle 2: the shared title finished airing; both accounts list it.
        let mut source = MockWatchListSource::new();
        source
            .expect_plan_to_watch()
            .returning(|_| Ok(vec![title(7, "Shared", AiringStatus::FinishedAiring)]));
        let mut notifier = MockAnimeNotifier::new();
        notifier
            .expect_on_anime_changed()
            .times(1)
            .return_const(());

        let engine = fixture.engine(source, notifier);
        engine.detect_changes().await.unwrap();

        // Both accounts reference the same stored record.
        let alice = fixture
            .accounts
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        let bob = fixture
            .accounts
            .find_by_username("bob")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alice.plan_to_watch, bob.plan_to_watch);
    }
}
