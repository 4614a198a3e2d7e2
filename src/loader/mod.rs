//! Content loading.
//!
//! Resolves content paths, fetches them without caching, checks the status
//! and parses the body as JSON. `load_site` fetches both documents
//! concurrently and fails on the first error.

mod error;
mod fetch;
mod location;
mod response;

pub use error::LoadError;
pub use fetch::{DefaultFetcher, DefaultFetcherBuilder, Fetch, DEFAULT_TIMEOUT, USER_AGENT};
pub use location::Location;
pub use response::FetchResponse;

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::Settings;
use crate::models::{ContentDocument, SiteContent, WorksDocument};

/// Loads content documents through a [`Fetch`] implementation.
pub struct ContentLoader<F = DefaultFetcher> {
    fetcher: F,
    base_url: Option<Url>,
}

impl ContentLoader<DefaultFetcher> {
    /// Build a loader with the HTTP/file fetcher configured from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let mut builder = DefaultFetcher::builder().timeout(settings.timeout());
        if let Some(ua) = settings.user_agent.as_deref() {
            builder = builder.user_agent(ua);
        }
        Ok(Self {
            fetcher: builder.build()?,
            base_url: settings.base_url.clone(),
        })
    }
}

impl<F: Fetch> ContentLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: None,
        }
    }

    /// Resolve relative paths against `base`.
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Fetch and parse one JSON document.
    pub async fn load(&self, path: &str) -> Result<Value, LoadError> {
        let location = Location::resolve(path, self.base_url.as_ref())?;
        info!("Loading {}", location);

        let response = self.fetcher.fetch(&location).await?;
        if !response.is_success() {
            return Err(LoadError::Status {
                location: path.to_string(),
                status: response.status.as_u16(),
            });
        }

        debug!("{} returned {} bytes", location, response.body.len());
        serde_json::from_slice(&response.body).map_err(|source| LoadError::Parse {
            location: path.to_string(),
            source,
        })
    }

    pub async fn load_content(&self, path: &str) -> Result<ContentDocument, LoadError> {
        self.load(path).await.map(ContentDocument::from_value)
    }

    pub async fn load_works(&self, path: &str) -> Result<WorksDocument, LoadError> {
        self.load(path).await.map(WorksDocument::from_value)
    }

    /// Load both site documents concurrently.
    ///
    /// Both must succeed; the first failure is returned and the other
    /// result is discarded.
    pub async fn load_site(
        &self,
        content_path: &str,
        works_path: &str,
    ) -> Result<SiteContent, LoadError> {
        let (content, works) =
            tokio::try_join!(self.load_content(content_path), self.load_works(works_path))?;
        Ok(SiteContent { content, works })
    }
}
