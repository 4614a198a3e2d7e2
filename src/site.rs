//! Page bootstrap: load both documents, then render.

use tracing::{error, info};

use crate::config::{Settings, DEFAULT_CONTENT_PATH, DEFAULT_WORKS_PATH};
use crate::loader::{ContentLoader, Fetch, LoadError};
use crate::models::SiteContent;
use crate::page::Page;
use crate::render::{render_site, RenderOptions};

/// Where the two site documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub content: String,
    pub works: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            content: DEFAULT_CONTENT_PATH.to_string(),
            works: DEFAULT_WORKS_PATH.to_string(),
        }
    }
}

impl From<&Settings> for Sources {
    fn from(settings: &Settings) -> Self {
        Self {
            content: settings.content.clone(),
            works: settings.works.clone(),
        }
    }
}

/// Receives load failures during bootstrap.
pub trait DiagnosticSink {
    fn report(&self, error: &LoadError);
}

/// Logs failures at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, err: &LoadError) {
        error!("{}", err);
    }
}

/// Load content and works concurrently and render them into `page`.
///
/// On failure the error goes to `sink` and is returned; the page is left
/// exactly as it was.
pub async fn init<F: Fetch>(
    page: &mut Page,
    loader: &ContentLoader<F>,
    sources: &Sources,
    options: &RenderOptions,
    sink: &dyn DiagnosticSink,
) -> Result<SiteContent, LoadError> {
    let site = match loader.load_site(&sources.content, &sources.works).await {
        Ok(site) => site,
        Err(e) => {
            sink.report(&e);
            return Err(e);
        }
    };

    render_site(page, &site, options);
    info!(
        "Rendered {} section(s) and {} work(s)",
        site.content.home.sections.len(),
        site.works.videos.len()
    );
    Ok(site)
}
