use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Airing state of a title as reported by MyAnimeList.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiringStatus {
    NotYetAired,
    CurrentlyAiring,
    FinishedAiring,
}

impl AiringStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            AiringStatus::NotYetAired => "Not Yet Aired",
            AiringStatus::CurrentlyAiring => "Currently Airing",
            AiringStatus::FinishedAiring => "Finished Airing",
        }
    }
}

impl fmt::Display for AiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AiringStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_yet_aired" | "not yet aired" => Ok(AiringStatus::NotYetAired),
            "currently_airing" | "currently airing" => Ok(AiringStatus::CurrentlyAiring),
            "finished_airing" | "finished airing" => Ok(AiringStatus::FinishedAiring),
            other => Err(AppError::InvalidInput(format!(
                "Unknown airing status: {}",
                other
            ))),
        }
    }
}
