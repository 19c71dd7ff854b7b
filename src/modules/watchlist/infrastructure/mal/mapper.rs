use chrono::NaiveDate;

use super::dto::AnimeNode;
use crate::modules::watchlist::domain::source::WatchListTitle;
use crate::shared::errors::{AppError, AppResult};

pub struct MalMapper;

impl MalMapper {
    pub fn to_title(node: AnimeNode) -> AppResult<WatchListTitle> {
        let status = node.status.parse()?;

        Ok(WatchListTitle {
            mal_id: node.id,
            title: node.title,
            title_english: node
                .alternative_titles
                .and_then(|titles| titles.en)
                .filter(|en| !en.is_empty()),
            picture_large: node.main_picture.as_ref().and_then(|p| p.large.clone()),
            picture_medium: node.main_picture.as_ref().and_then(|p| p.medium.clone()),
            start_date: node.start_date.as_deref().map(Self::parse_date).transpose()?,
            end_date: node.end_date.as_deref().map(Self::parse_date).transpose()?,
            status,
            episodes: node.num_episodes,
        })
    }

    /// The API reports partial dates for titles that are far out
    /// ("2026" or "2026-04"); pad them to the first day.
    fn parse_date(raw: &str) -> AppResult<NaiveDate> {
        let padded = match raw.len() {
            4 => format!("{}-01-01", raw),
            7 => format!("{}-01", raw),
            _ => raw.to_string(),
        };

        NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidInput(format!("Unparseable air date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::anime::domain::value_objects::AiringStatus;
    use crate::modules::watchlist::infrastructure::mal::dto::{AlternativeTitles, MainPicture};

    fn node() -> AnimeNode {
        AnimeNode {
            id: 52991,
            title: "Sousou no Frieren".to_string(),
            main_picture: Some(MainPicture {
                large: Some("https://cdn.example/large.jpg".to_string()),
                medium: Some("https://cdn.example/medium.jpg".to_string()),
            }),
            alternative_titles: Some(AlternativeTitles {
                en: Some("Frieren: Beyond Journey's End".to_string()),
            }),
            start_date: Some("2023-09-29".to_string()),
            end_date: None,
            status: "currently_airing".to_string(),
            num_episodes: 28,
        }
    }

    #[test]
    fn test_maps_full_node() {
        let title = MalMapper::to_title(node()).unwrap();
        assert_eq!(title.mal_id, 52991);
        assert_eq!(title.status, AiringStatus::CurrentlyAiring);
        assert_eq!(
            title.start_date,
            Some(NaiveDate::from_ymd_opt(2023, 9, 29).unwrap())
        );
        assert_eq!(title.end_date, None);
        assert_eq!(title.episodes, 28);
    }

    #[test]
    fn test_pads_partial_dates() {
        let mut partial = node();
        partial.start_date = Some("2026".to_string());
        partial.end_date = Some("2026-04".to_string());

        let title = MalMapper::to_title(partial).unwrap();
        assert_eq!(
            title.start_date,
            Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
        );
        assert_eq!(
            title.end_date,
            Some(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
        );
    }

    #[test]
    fn test_empty_english_title_becomes_none() {
        let mut no_en = node();
        no_en.alternative_titles = Some(AlternativeTitles {
            en: Some(String::new()),
        });

        let title = MalMapper::to_title(no_en).unwrap();
        assert_eq!(title.title_english, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut bad = node();
        bad.status = "on_hiatus".to_string();
        assert!(MalMapper::to_title(bad).is_err());
    }
}
