//! Transport for content documents.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::debug;

use super::{FetchResponse, LoadError, Location};

/// Default user agent for content requests.
pub const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the raw bytes behind a [`Location`].
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<FetchResponse, LoadError>;
}

/// HTTP via reqwest, local files via tokio.
///
/// Every HTTP request bypasses caches so the latest published content is
/// always used.
#[derive(Clone)]
pub struct DefaultFetcher {
    client: Client,
}

/// Builder for [`DefaultFetcher`].
pub struct DefaultFetcherBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl DefaultFetcherBuilder {
    /// Set the request timeout. A timed-out request fails the load.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string (defaults to [`USER_AGENT`]).
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    pub fn build(self) -> Result<DefaultFetcher, reqwest::Error> {
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_string());
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .build()?;
        Ok(DefaultFetcher { client })
    }
}

impl DefaultFetcher {
    pub fn builder() -> DefaultFetcherBuilder {
        DefaultFetcherBuilder {
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    async fn fetch_remote(&self, url: &url::Url) -> Result<FetchResponse, LoadError> {
        let transport = |source| LoadError::Transport {
            location: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        let body = response.bytes().await.map_err(transport)?;
        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl Fetch for DefaultFetcher {
    async fn fetch(&self, location: &Location) -> Result<FetchResponse, LoadError> {
        match location {
            Location::Remote(url) => self.fetch_remote(url).await,
            Location::Local(path) => {
                let body = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                    location: location.to_string(),
                    source,
                })?;
                debug!("Read {} ({} bytes)", path.display(), body.len());
                Ok(FetchResponse::from_file(body))
            }
        }
    }
}
