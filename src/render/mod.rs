//! Projecting typed content into a page.
//!
//! Renderers address the template through optional anchors: every operation
//! here is a no-op when its selector matches nothing, so any renderer can run
//! against any template.

mod contacts;
mod home;
pub mod templates;
mod works;

pub use contacts::render_contacts;
pub use home::render_home;
pub use works::render_works;

use tracing::debug;
use url::Url;

use crate::dom::NodeId;
use crate::models::SiteContent;
use crate::page::Page;
use crate::utils::{css_url, Markup};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Base that relative poster URLs resolve against.
    pub base_url: Option<Url>,
}

impl RenderOptions {
    pub fn with_base_url(base_url: Option<Url>) -> Self {
        Self { base_url }
    }
}

/// Render every page section the template has anchors for.
pub fn render_site(page: &mut Page, site: &SiteContent, options: &RenderOptions) {
    render_home(page, &site.content, options);
    render_works(page, &site.works, options);
    render_contacts(page, &site.content.contacts);
}

fn anchor(page: &Page, selector: &str) -> Option<NodeId> {
    let found = page.document().query(selector);
    if found.is_none() {
        debug!("No {} anchor in template, skipping", selector);
    }
    found
}

/// Replace the anchor's children with a single text node.
pub fn set_text(page: &mut Page, selector: &str, text: &str) -> Option<NodeId> {
    let id = anchor(page, selector)?;
    page.document_mut().set_text_content(id, text);
    page.mount_widgets(id);
    Some(id)
}

/// Set an attribute on the anchor; an empty value removes it.
pub fn set_attr(page: &mut Page, selector: &str, name: &str, value: &str) -> Option<NodeId> {
    let id = anchor(page, selector)?;
    let doc = page.document_mut();
    if value.is_empty() {
        doc.remove_attr(id, name);
    } else {
        doc.set_attr(id, name, value);
    }
    Some(id)
}

/// Replace the anchor's children with `markup` and mount any widgets it
/// contains. Widgets from the replaced children are dropped.
pub fn set_html(page: &mut Page, selector: &str, markup: &Markup) -> Option<NodeId> {
    let id = anchor(page, selector)?;
    page.document_mut().set_inner_html(id, markup);
    page.mount_widgets(id);
    Some(id)
}

/// Set the anchor's inline `background-image`; an empty URL clears it.
pub fn set_background_image(page: &mut Page, selector: &str, url: &str) -> Option<NodeId> {
    let id = anchor(page, selector)?;
    let value = (!url.is_empty()).then(|| css_url(url));
    page.document_mut()
        .set_style_property(id, "background-image", value.as_deref());
    Some(id)
}
