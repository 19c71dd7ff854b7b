use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::modules::anime::domain::entities::AnimeRecord;
use crate::modules::anime::domain::repositories::AnimeRepository;
use crate::shared::errors::{AppError, AppResult};

/// Process-local anime store. Upserts by record id and enforces the
/// unique index on `mal_id` the way the persistent engine would.
#[derive(Default)]
pub struct InMemoryAnimeStore {
    records: DashMap<Uuid, AnimeRecord>,
}

impl InMemoryAnimeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeStore {
    async fn find_by_mal_id(&self, mal_id: i32) -> AppResult<Option<AnimeRecord>> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.value().mal_id == mal_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save_batch(&self, records: &[AnimeRecord]) -> AppResult<()> {
        for record in records {
            let duplicate = self
                .records
                .iter()
                .any(|entry| entry.value().mal_id == record.mal_id && *entry.key() != record.id);
            if duplicate {
                return Err(AppError::StorageError(format!(
                    "Duplicate mal_id {} for record {}",
                    record.mal_id, record.id
                )));
            }
            self.records.insert(record.id, record.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.records.remove(&id);
        Ok(())
    }
}
