//! HTTP client for Handball4All

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::document::{parse_league_document, LeagueDocument};
use crate::domain::{DomainError, LeagueData, LeagueSource};

/// Thin reqwest wrapper that reports every failure as a fetch error for the URL
#[derive(Debug, Clone)]
pub struct H4aClient {
    client: reqwest::Client,
}

impl H4aClient {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch the body of `url` as text
    pub async fn get(&self, url: &str) -> Result<String, DomainError> {
        debug!(url = %url, "Fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::fetch(url, format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::fetch(url, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::fetch(url, format!("Failed to read body: {}", e)))
    }

    /// Fetch `url` and decode the body as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DomainError> {
        let body = self.get(url).await?;

        serde_json::from_str(&body)
            .map_err(|e| DomainError::fetch(url, format!("Invalid JSON: {}", e)))
    }
}

#[async_trait]
impl LeagueSource for H4aClient {
    async fn fetch_league(&self, url: &str) -> Result<LeagueData, DomainError> {
        let documents: Vec<LeagueDocument> = self.get_json(url).await?;
        parse_league_document(url, documents)
    }
}
