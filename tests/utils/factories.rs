/// Test data factories using builder pattern
///
/// Provides convenient methods to create watch-list titles with sensible
/// defaults.
use chrono::NaiveDate;
use mal_notify::modules::anime::domain::value_objects::AiringStatus;
use mal_notify::modules::watchlist::domain::source::WatchListTitle;

pub struct TitleFactory {
    mal_id: i32,
    title: String,
    status: AiringStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    episodes: i32,
}

impl TitleFactory {
    pub fn new(mal_id: i32, title: &str) -> Self {
        Self {
            mal_id,
            title: title.to_string(),
            status: AiringStatus::NotYetAired,
            start_date: None,
            end_date: None,
            episodes: 12,
        }
    }

    pub fn not_yet_aired(mut self) -> Self {
        self.status = AiringStatus::NotYetAired;
        self
    }

    pub fn airing(mut self) -> Self {
        self.status = AiringStatus::CurrentlyAiring;
        self.start_date = Some(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap());
        self
    }

    pub fn finished(mut self) -> Self {
        self.status = AiringStatus::FinishedAiring;
        self.start_date = Some(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap());
        self.end_date = Some(NaiveDate::from_ymd_opt(2026, 3, 27).unwrap());
        self
    }

    pub fn with_episodes(mut self, episodes: i32) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn build(self) -> WatchListTitle {
        WatchListTitle {
            mal_id: self.mal_id,
            title: self.title,
            title_english: None,
            picture_large: None,
            picture_medium: None,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            episodes: self.episodes,
        }
    }
}
