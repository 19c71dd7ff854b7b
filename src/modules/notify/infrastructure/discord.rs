use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::modules::anime::domain::entities::{AnimeRecord, AIRING_TZ};
use crate::modules::anime::domain::value_objects::AiringStatus;
use crate::modules::notify::domain::messenger::ChangeMessenger;
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

/// Delivers change messages as Discord direct messages through the REST
/// API. The recipient id is the Discord user id.
pub struct DiscordMessenger {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl DiscordMessenger {
    pub fn new(bot_token: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("mal-notify/0.1")
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: "https://discord.com/api/v10".to_string(),
            bot_token: bot_token.into(),
        })
    }

    async fn open_dm_channel(&self, recipient_id: &str) -> AppResult<String> {
        let response = self
            .client
            .post(format!("{}/users/@me/channels", self.base_url))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&json!({ "recipient_id": recipient_id }))
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to open DM channel: {}", e)))?;

        Self::handle_response_status(response.status())?;

        let channel = response
            .json::<DmChannel>()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse DM channel: {}", e)))?;
        Ok(channel.id)
    }

    fn handle_response_status(status: StatusCode) -> AppResult<()> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Unknown recipient".to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(AppError::RateLimitError("Discord rate limit".to_string()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(
                "Discord rejected the bot token".to_string(),
            )),
            other => Err(AppError::ApiError(format!(
                "Discord returned HTTP {}",
                other
            ))),
        }
    }

    fn format_message(record: &AnimeRecord) -> String {
        let headline = match record.status {
            AiringStatus::CurrentlyAiring => "started airing",
            AiringStatus::FinishedAiring => "finished airing",
            AiringStatus::NotYetAired => "did not air yet",
        };

        let mut title = record.title.clone();
        if let Some(en) = &record.title_english {
            if en != &record.title {
                title.push_str(&format!(" ({})", en));
            }
        }

        format!(
            "**{}** {}\nStart date: {}\nEnd date: {}\nEpisodes: {}\n{}",
            title,
            headline,
            Self::format_date(record.start_date, "did not start airing yet"),
            Self::format_date(record.end_date, "did not finish airing yet"),
            record.episodes,
            record.mal_url(),
        )
    }

    fn format_date(date: Option<DateTime<Utc>>, fallback: &str) -> String {
        match date {
            Some(date) => date
                .with_timezone(&AIRING_TZ)
                .format("%Y-%m-%d")
                .to_string(),
            None => fallback.to_string(),
        }
    }
}

#[async_trait]
impl ChangeMessenger for DiscordMessenger {
    async fn deliver(&self, recipient_id: &str, record: &AnimeRecord) -> AppResult<()> {
        let channel_id = self.open_dm_channel(recipient_id).await?;

        let response = self
            .client
            .post(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&json!({ "content": Self::format_message(record) }))
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to send message: {}", e)))?;

        Self::handle_response_status(response.status())
    }
}
