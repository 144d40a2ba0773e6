use async_trait::async_trait;
use std::time::Duration;

use crate::app::ports::DocumentFetcherPort;
use crate::config::CrawlerConfig;
use crate::error::{Result, ScraperError};

pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Self::new(&config.user_agent, config.timeout())
    }
}

#[async_trait]
impl DocumentFetcherPort for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
