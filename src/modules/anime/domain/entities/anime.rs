use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::anime::domain::value_objects::AiringStatus;

/// Timezone the source reports air dates in. Dates are stored as that
/// timezone's midnight.
pub const AIRING_TZ: Tz = chrono_tz::Asia::Tokyo;

/// Normalized field set produced from one externally sourced title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeFields {
    pub mal_id: i32,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: AiringStatus,
    pub episodes: i32,
}

/// A tracked anime title. Unique by `mal_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRecord {
    pub id: Uuid,
    pub mal_id: i32,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: AiringStatus,
    pub episodes: i32,
}

impl AnimeRecord {
    pub fn new(fields: AnimeFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            mal_id: fields.mal_id,
            title: fields.title,
            title_english: fields.title_english,
            image_url: fields.image_url,
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: fields.status,
            episodes: fields.episodes,
        }
    }

    /// Apply a fresh field set, assigning only fields that actually differ
    /// so the storage layer's modification tracking stays meaningful.
    pub fn apply(&mut self, fields: &AnimeFields) {
        if self.title != fields.title {
            self.title = fields.title.clone();
        }
        if self.title_english != fields.title_english {
            self.title_english = fields.title_english.clone();
        }
        if self.image_url != fields.image_url {
            self.image_url = fields.image_url.clone();
        }
        if self.start_date != fields.start_date {
            self.start_date = fields.start_date;
        }
        if self.end_date != fields.end_date {
            self.end_date = fields.end_date;
        }
        if self.status != fields.status {
            self.status = fields.status;
        }
        if self.episodes != fields.episodes {
            self.episodes = fields.episodes;
        }
    }

    pub fn mal_url(&self) -> String {
        format!("https://myanimelist.net/anime/{}", self.mal_id)
    }
}
