//! Related-coverage search against the Naver News API, plus the date filter
//! applied to its results.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::models::NewsItem;
use crate::utils::truncate_for_log;

/// The API rejects `display` above this.
const MAX_DISPLAY: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<NewsItem>,
}

/// Header-authenticated JSON client for the news-search endpoint.
#[derive(Debug, Clone)]
pub struct NaverNewsClient {
    http: reqwest::Client,
    endpoint: String,
    client_id: String,
    client_secret: String,
}

impl NaverNewsClient {
    pub fn new(
        config: &SearchConfig,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    /// Search recent coverage for the given keywords, newest first.
    ///
    /// Keywords are space-joined into one query. An empty keyword slice is
    /// rejected up front (caller bug); an empty *result* list is returned
    /// as-is (valid outcome). Non-2xx responses surface as errors with the
    /// response body attached.
    #[instrument(level = "info", skip_all, fields(display = display_count))]
    pub async fn search(
        &self,
        keywords: &[String],
        display_count: u32,
    ) -> Result<Vec<NewsItem>, SearchError> {
        if keywords.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let query = keywords.iter().join(" ");
        let display = display_count.clamp(1, MAX_DISPLAY).to_string();

        let response = self
            .http
            .get(&self.endpoint)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[
                ("query", query.as_str()),
                ("display", display.as_str()),
                ("sort", "date"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_for_log(&body, 300), "news search rejected");
            return Err(SearchError::Status { status, body });
        }

        let parsed: SearchResponse = response.json().await?;
        info!(count = parsed.items.len(), %query, "news search completed");
        Ok(parsed.items)
    }
}

/// Keep only items whose publish date falls in `[start, end]`, both ends
/// inclusive.
///
/// Comparison is by calendar date in each item's own UTC offset; time of day
/// never matters. Items with a missing or unparsable timestamp are dropped
/// silently — routine feed noise, not an error. Output order equals input
/// order.
pub fn filter_by_date(items: &[NewsItem], start: NaiveDate, end: NaiveDate) -> Vec<NewsItem> {
    items
        .iter()
        .filter(|item| match item.published_date() {
            Some(date) => start <= date && date <= end,
            None => false,
        })
        .cloned()
        .collect()
}
