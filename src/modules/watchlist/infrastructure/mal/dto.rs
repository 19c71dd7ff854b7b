use serde::Deserialize;

/// Wire types for the MyAnimeList API v2 `animelist` endpoint.

#[derive(Debug, Deserialize)]
pub struct AnimeListPage {
    pub data: Vec<AnimeListEntry>,
    #[serde(default)]
    pub paging: Paging,
}

#[derive(Debug, Deserialize, Default)]
pub struct Paging {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnimeListEntry {
    pub node: AnimeNode,
}

#[derive(Debug, Deserialize)]
pub struct AnimeNode {
    pub id: i32,
    pub title: String,
    pub main_picture: Option<MainPicture>,
    pub alternative_titles: Option<AlternativeTitles>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    #[serde(default)]
    pub num_episodes: i32,
}

#[derive(Debug, Deserialize)]
pub struct MainPicture {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlternativeTitles {
    pub en: Option<String>,
}
