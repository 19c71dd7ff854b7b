use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{dto::AnimeListPage, mapper::MalMapper};
use crate::modules::watchlist::domain::source::{WatchListSource, WatchListTitle};
use crate::shared::{
    errors::{AppError, AppResult},
    utils::RateLimiter,
};

const PAGE_LIMIT: usize = 100;
const LIST_FIELDS: &str = "alternative_titles,start_date,end_date,status,num_episodes";

/// MyAnimeList API v2 client. Requests carry the public client id header
/// and are paced so a burst of accounts does not trip the API.
pub struct MalClient {
    client: Client,
    base_url: String,
    client_id: String,
    rate_limiter: RateLimiter,
}

impl MalClient {
    pub fn new(client_id: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("mal-notify/0.1")
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: "https://api.myanimelist.net/v2".to_string(),
            client_id: client_id.into(),
            rate_limiter: RateLimiter::new(1.0, 3),
        })
    }

    async fn fetch_page(&self, username: &str, offset: usize) -> AppResult<AnimeListPage> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/users/{}/animelist",
            self.base_url,
            urlencoding::encode(username)
        );
        let limit = PAGE_LIMIT.to_string();
        let offset = offset.to_string();
        let response = self
            .client
            .get(&url)
            .header("X-MAL-CLIENT-ID", &self.client_id)
            .query(&[
                ("status", "plan_to_watch"),
                ("fields", LIST_FIELDS),
                ("nsfw", "true"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Watch list fetch failed: {}", e)))?;

        Self::handle_response_status(response.status())?;

        response
            .json::<AnimeListPage>()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse watch list page: {}", e)))
    }

    fn handle_response_status(status: StatusCode) -> AppResult<()> {
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Account not found".to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(AppError::RateLimitError("MyAnimeList rate limit".to_string()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(
                "MyAnimeList rejected the client id".to_string(),
            )),
            other => Err(AppError::ApiError(format!(
                "MyAnimeList returned HTTP {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl WatchListSource for MalClient {
    async fn plan_to_watch(&self, username: &str) -> AppResult<Vec<WatchListTitle>> {
        let mut titles = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(username, offset).await?;
            let has_next = page.paging.next.is_some();

            for entry in page.data {
                titles.push(MalMapper::to_title(entry.node)?);
            }

            if !has_next {
                break;
            }
            offset += PAGE_LIMIT;
        }

        Ok(titles)
    }

    async fn exists(&self, username: &str) -> AppResult<bool> {
        match self.fetch_page(username, 0).await {
            Ok(_) => Ok(true),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
