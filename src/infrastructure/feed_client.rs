use crate::config::FeedEnvConfig;
use crate::domain::game::{FeedSnapshot, FeedType};
use crate::domain::ports::FeedProvider;
use crate::infrastructure::core::HttpClientFactory;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};
use url::Url;

/// Reads the result history document from the upstream HTTP endpoint.
pub struct HttpFeedProvider {
    client: Client,
    url: Url,
}

impl HttpFeedProvider {
    pub fn new(config: &FeedEnvConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(config.timeout, config.connect_timeout),
            url: config.api_url.clone(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn try_fetch(&self) -> anyhow::Result<FeedSnapshot> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .context("Failed to send request to feed upstream")?;

        if !response.status().is_success() {
            anyhow::bail!("Feed upstream returned status: {}", response.status());
        }

        let snapshot: FeedSnapshot = response
            .json()
            .await
            .context("Failed to parse feed upstream response")?;

        info!(
            "HttpFeedProvider: fetched {} hu / {} md5 rounds",
            snapshot.published_len(FeedType::Hu),
            snapshot.published_len(FeedType::Md5)
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl FeedProvider for HttpFeedProvider {
    async fn fetch_snapshot(&self) -> Option<FeedSnapshot> {
        match self.try_fetch().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!("HttpFeedProvider: error fetching {}: {:#}", self.url, e);
                None
            }
        }
    }
}
