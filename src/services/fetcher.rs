// src/services/fetcher.rs

//! Page retrieval.
//!
//! One GET per call, no retry, no caching. Anything other than a 200
//! response is an error; callers treat every error as "page unavailable"
//! and fall back rather than abort.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Retrieves raw markup and parses it into a document.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher with a configured HTTP client.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch a page and parse it as HTML.
    pub async fn fetch(&self, url: &str) -> Result<Html> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::status(url, status.as_u16()));
        }
        let text = response.text().await?;
        Ok(Html::parse_document(&text))
    }
}
