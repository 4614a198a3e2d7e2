//! Home page: hero, intro video, about block and content sections.

use super::templates;
use super::{set_attr, set_background_image, set_html, set_text, RenderOptions};
use crate::models::ContentDocument;
use crate::page::Page;

pub const DEFAULT_ABOUT_TITLE: &str = "About";

pub fn render_home(page: &mut Page, content: &ContentDocument, _options: &RenderOptions) {
    let hero = &content.home.hero;
    let intro = &content.home.intro;

    set_text(page, "#footer-text", &content.site.footer_text);

    set_background_image(page, "#hero-bg", &hero.bg_image);
    if let Some(avatar) = set_attr(page, "#hero-avatar", "src", &hero.avatar_image) {
        page.watch_image_error(avatar);
    }
    set_text(page, "#hero-title", &hero.title);
    set_text(page, "#hero-subtitle", &hero.subtitle);

    set_html(page, "#intro-video-slot", &templates::intro_video(intro));

    let about_title = if intro.about_title.is_empty() {
        DEFAULT_ABOUT_TITLE
    } else {
        intro.about_title.as_str()
    };
    set_text(page, "#about-title", about_title);
    set_html(
        page,
        "#about-text",
        &templates::paragraphs("about-text", &intro.about_text),
    );

    set_html(
        page,
        "#sections-root",
        &templates::sections(&content.home.sections),
    );
}
