use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60 * 60;

/// Runtime configuration, collected from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client id sent with every MyAnimeList API request.
    pub mal_client_id: String,
    /// Bot token used by the Discord messenger.
    pub discord_bot_token: String,
    /// Delay between change detection cycles.
    pub sync_interval: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mal_client_id = std::env::var("MAL_CLIENT_ID")
            .map_err(|_| AppError::ConfigError("MAL_CLIENT_ID is not set".to_string()))?;
        let discord_bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| AppError::ConfigError("DISCORD_BOT_TOKEN is not set".to_string()))?;
        let sync_interval = match std::env::var("SYNC_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!("SYNC_INTERVAL_SECS is not a number: {}", raw))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
        };

        Ok(Self {
            mal_client_id,
            discord_bot_token,
            sync_interval,
        })
    }
}
