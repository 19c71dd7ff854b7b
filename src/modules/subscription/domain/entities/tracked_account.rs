use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// An external account whose plan-to-watch list is polled on behalf of
/// one or more subscribers. Unique by `username`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedAccount {
    pub id: Uuid,
    pub username: String,
    /// Anime record ids from the last successful sync. Order is irrelevant;
    /// the whole set is replaced each cycle.
    pub plan_to_watch: HashSet<Uuid>,
}

impl TrackedAccount {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            plan_to_watch: HashSet::new(),
        }
    }

    /// Replace the reference set with the latest reconciled ids and return
    /// the ids that are no longer present.
    pub fn replace_references(&mut self, ids: HashSet<Uuid>) -> Vec<Uuid> {
        let removed = self.plan_to_watch.difference(&ids).copied().collect();
        self.plan_to_watch = ids;
        removed
    }

    pub fn references(&self, anime_id: Uuid) -> bool {
        self.plan_to_watch.contains(&anime_id)
    }
}
