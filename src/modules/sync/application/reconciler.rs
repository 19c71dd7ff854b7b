use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

use crate::modules::anime::domain::entities::{AnimeFields, AnimeRecord, AIRING_TZ};
use crate::modules::anime::domain::repositories::AnimeRepository;
use crate::modules::watchlist::domain::source::WatchListTitle;
use crate::shared::errors::AppResult;

/// Result of reconciling one fetched title against stored state.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub record: AnimeRecord,
    pub status_changed: bool,
    pub end_date_changed: bool,
}

impl ReconcileOutcome {
    pub fn has_changes(&self) -> bool {
        self.status_changed || self.end_date_changed
    }
}

/// Diffs one externally sourced title against the stored record. Never
/// persists anything itself; callers collect the returned records and
/// bulk-save them.
pub struct AnimeReconciler {
    anime_repo: Arc<dyn AnimeRepository>,
}

impl AnimeReconciler {
    pub fn new(anime_repo: Arc<dyn AnimeRepository>) -> Self {
        Self { anime_repo }
    }

    pub async fn reconcile(&self, title: &WatchListTitle) -> AppResult<ReconcileOutcome> {
        let fields = Self::normalize(title);

        let Some(mut record) = self.anime_repo.find_by_mal_id(title.mal_id).await? else {
            // A brand-new record is not a change to notify about.
            return Ok(ReconcileOutcome {
                record: AnimeRecord::new(fields),
                status_changed: false,
                end_date_changed: false,
            });
        };

        let previous_status = record.status;
        let previous_end_date = record.end_date;
        record.apply(&fields);

        Ok(ReconcileOutcome {
            status_changed: record.status != previous_status,
            end_date_changed: record.end_date != previous_end_date,
            record,
        })
    }

    fn normalize(title: &WatchListTitle) -> AnimeFields {
        AnimeFields {
            mal_id: title.mal_id,
            title: title.title.clone(),
            title_english: title.title_english.clone(),
            image_url: title
                .picture_large
                .clone()
                .or_else(|| title.picture_medium.clone()),
            start_date: title.start_date.and_then(|d| midnight_in(d, AIRING_TZ)),
            end_date: title.end_date.and_then(|d| midnight_in(d, AIRING_TZ)),
            status: title.status,
            episodes: title.episodes,
        }
    }
}

/// Midnight of the given calendar date in `tz`, as a UTC instant.
fn midnight_in(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    use chrono::TimeZone;

    let midnight = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
