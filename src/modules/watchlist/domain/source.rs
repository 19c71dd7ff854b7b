use async_trait::async_trait;
use chrono::NaiveDate;

use crate::modules::anime::domain::value_objects::AiringStatus;
use crate::shared::errors::AppResult;

/// One title from an external plan-to-watch list, as fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchListTitle {
    pub mal_id: i32,
    pub title: String,
    pub title_english: Option<String>,
    pub picture_large: Option<String>,
    pub picture_medium: Option<String>,
    /// Calendar dates in the airing timezone, as reported by the source.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: AiringStatus,
    pub episodes: i32,
}

/// External watch-list provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WatchListSource: Send + Sync {
    /// Fetch the complete plan-to-watch list for an account.
    async fn plan_to_watch(&self, username: &str) -> AppResult<Vec<WatchListTitle>>;

    /// Whether the account exists at the source. An unknown account is a
    /// `false`, never an error.
    async fn exists(&self, username: &str) -> AppResult<bool>;
}
