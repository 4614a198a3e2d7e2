//! Works page: hero and the grid of click-to-play video cards.

use super::templates;
use super::{set_background_image, set_html, set_text, RenderOptions};
use crate::models::WorksDocument;
use crate::page::Page;

pub const DEFAULT_WORKS_TITLE: &str = "My Works";
pub const DEFAULT_WORKS_SUBTITLE: &str = "Selected projects and edits";

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

pub fn render_works(page: &mut Page, works: &WorksDocument, options: &RenderOptions) {
    set_background_image(page, "#works-hero-bg", &works.hero.bg_image);
    set_text(
        page,
        "#works-hero-title",
        or_default(&works.hero.title, DEFAULT_WORKS_TITLE),
    );
    set_text(
        page,
        "#works-hero-subtitle",
        or_default(&works.hero.subtitle, DEFAULT_WORKS_SUBTITLE),
    );

    set_html(
        page,
        "#works-grid",
        &templates::work_grid(&works.videos, options.base_url.as_ref()),
    );
}
