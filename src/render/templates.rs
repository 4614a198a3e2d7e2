//! Markup builders for the rendered blocks.
//!
//! Every dynamic value is passed through [`html_escape`] before it is
//! interpolated, which is what allows these functions to hand out [`Markup`].

use url::Url;

use crate::models::{ContactLink, Intro, Section, WorkItem};
use crate::utils::{css_url, html_escape, resolve_url, Markup};
use crate::widgets::preview::PLAYER_ALLOW;

pub const DEFAULT_SECTION_TITLE_PREFIX: &str = "Section";
pub const DEFAULT_WORK_TITLE: &str = "New work";
pub const DEFAULT_WORK_SUBTITLE: &str = "Short description...";
pub const DEFAULT_INTRO_VIDEO_TITLE: &str = "Intro video";

/// One `<p>` per entry, in order.
pub fn paragraphs(class: &str, texts: &[String]) -> Markup {
    Markup::concat(texts.iter().map(|text| {
        Markup::trusted(format!(
            r#"<p class="{}">{}</p>"#,
            html_escape(class),
            html_escape(text)
        ))
    }))
}

/// The intro slot: an embedded player, a native video, or nothing.
pub fn intro_video(intro: &Intro) -> Markup {
    if !intro.video_embed_url.is_empty() {
        let title = if intro.video_title.is_empty() {
            DEFAULT_INTRO_VIDEO_TITLE
        } else {
            intro.video_title.as_str()
        };
        return Markup::trusted(format!(
            r#"<iframe src="{}" title="{}" frameborder="0" allow="{}" allowfullscreen></iframe>"#,
            html_escape(&intro.video_embed_url),
            html_escape(title),
            PLAYER_ALLOW
        ));
    }

    if !intro.video_mp4_url.is_empty() {
        let poster = if intro.video_poster_url.is_empty() {
            String::new()
        } else {
            format!(r#" poster="{}""#, html_escape(&intro.video_poster_url))
        };
        return Markup::trusted(format!(
            r#"<video controls playsinline preload="metadata"{}><source src="{}" type="video/mp4"></video>"#,
            poster,
            html_escape(&intro.video_mp4_url)
        ));
    }

    Markup::empty()
}

/// All home sections, separated by dividers. Missing sections render nothing.
pub fn sections(sections: &[Section]) -> Markup {
    let last = sections.len().saturating_sub(1);
    Markup::concat(sections.iter().enumerate().map(|(i, s)| {
        let divider = if i < last {
            Markup::trusted(r#"<hr class="divider subtle">"#.to_string())
        } else {
            Markup::empty()
        };
        Markup::concat([section(i, s), divider])
    }))
}

/// One section: title and paragraphs beside an image carousel.
pub fn section(index: usize, section: &Section) -> Markup {
    let title = if section.title.is_empty() {
        format!("{} {}", DEFAULT_SECTION_TITLE_PREFIX, index + 1)
    } else {
        section.title.clone()
    };

    Markup::trusted(format!(
        r#"<article class="content-section"><div class="content-section-grid"><div class="content-text"><h2 class="section-title">{}</h2>{}</div><div class="content-carousel">{}</div></div></article>"#,
        html_escape(&title),
        paragraphs("section-paragraph", &section.text),
        carousel(&title, &section.images)
    ))
}

/// Carousel skeleton. The controller fills in dots and state once mounted.
pub fn carousel(title: &str, images: &[String]) -> Markup {
    let slides = if images.is_empty() {
        Markup::trusted(r#"<div class="carousel-empty">No images</div>"#.to_string())
    } else {
        Markup::concat(images.iter().enumerate().map(|(i, src)| {
            Markup::trusted(format!(
                r#"<img class="carousel-slide" src="{}" alt="{}" loading="lazy">"#,
                html_escape(src),
                html_escape(&format!("{} image {}", title, i + 1))
            ))
        }))
    };

    Markup::trusted(format!(
        concat!(
            r#"<div class="carousel" data-carousel>"#,
            r#"<button class="carousel-btn" type="button" data-carousel-prev aria-label="Previous">‹</button>"#,
            r#"<div class="carousel-viewport" data-carousel-viewport><div class="carousel-track" data-carousel-track>{}</div></div>"#,
            r#"<button class="carousel-btn" type="button" data-carousel-next aria-label="Next">›</button>"#,
            r#"<div class="carousel-dots" data-carousel-dots></div>"#,
            r#"</div>"#
        ),
        slides
    ))
}

/// A works grid card with a click-to-play poster.
///
/// The poster URL is resolved against `base`; an empty poster leaves the
/// button without a `style` attribute.
pub fn work_card(item: &WorkItem, base: Option<&Url>) -> Markup {
    let title = if item.title.is_empty() {
        DEFAULT_WORK_TITLE
    } else {
        item.title.as_str()
    };
    let subtitle = if item.subtitle.is_empty() {
        DEFAULT_WORK_SUBTITLE
    } else {
        item.subtitle.as_str()
    };

    let poster = resolve_url(base, &item.poster_url);
    let style = if poster.is_empty() {
        String::new()
    } else {
        format!(
            r#" style="{}""#,
            html_escape(&format!("background-image: {};", css_url(&poster)))
        )
    };

    Markup::trusted(format!(
        concat!(
            r#"<article class="work-card">"#,
            r#"<div class="work-card-header"><h3 class="work-card-title">{title}</h3><div class="work-card-subtitle">{subtitle}</div></div>"#,
            r#"<div class="work-card-media">"#,
            r#"<button class="video-preview" type="button" data-video-preview data-embed="{embed}" aria-label="Play: {title}"{style}>"#,
            r#"<span class="video-preview__play" aria-hidden="true"></span>"#,
            r#"</button></div></article>"#
        ),
        title = html_escape(title),
        subtitle = html_escape(subtitle),
        embed = html_escape(&item.embed_url),
        style = style
    ))
}

pub fn work_grid(items: &[WorkItem], base: Option<&Url>) -> Markup {
    Markup::concat(items.iter().map(|item| work_card(item, base)))
}

pub fn contact_link(link: &ContactLink) -> Markup {
    Markup::trusted(format!(
        r#"<li><a target="_blank" rel="noopener noreferrer" href="{}">{}</a></li>"#,
        html_escape(&link.href),
        html_escape(&link.label)
    ))
}

pub fn contact_links(links: &[ContactLink]) -> Markup {
    Markup::concat(links.iter().map(contact_link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_escape() {
        let m = paragraphs("about-text", &["a < b".to_string(), "it's".to_string()]);
        assert_eq!(
            m.as_str(),
            r#"<p class="about-text">a &lt; b</p><p class="about-text">it&#39;s</p>"#
        );
    }

    #[test]
    fn test_intro_video_precedence() {
        let mut intro = Intro {
            video_embed_url: "https://www.youtube.com/embed/x".to_string(),
            video_mp4_url: "/v.mp4".to_string(),
            ..Default::default()
        };
        let m = intro_video(&intro);
        assert!(m.as_str().starts_with("<iframe"));
        assert!(m.as_str().contains(r#"title="Intro video""#));

        intro.video_embed_url.clear();
        let m = intro_video(&intro);
        assert!(m.as_str().starts_with("<video"));
        assert!(!m.as_str().contains("poster="));

        intro.video_poster_url = "/p.jpg".to_string();
        assert!(intro_video(&intro).as_str().contains(r#"poster="/p.jpg""#));

        intro.video_mp4_url.clear();
        assert!(intro_video(&intro).is_empty());
    }

    #[test]
    fn test_sections_dividers_and_defaults() {
        let list = vec![
            Section {
                title: "Edits".to_string(),
                images: vec!["/a.jpg".to_string()],
                ..Default::default()
            },
            Section::default(),
        ];
        let m = sections(&list);
        assert_eq!(m.as_str().matches("<hr").count(), 1);
        assert!(m.as_str().contains(r#"alt="Edits image 1""#));
        assert!(m.as_str().contains("Section 2"));
        assert!(m.as_str().contains("No images"));
        assert!(sections(&[]).is_empty());
    }

    #[test]
    fn test_work_card_defaults_and_poster() {
        let item = WorkItem::default();
        let m = work_card(&item, None);
        assert!(m.as_str().contains("New work"));
        assert!(m.as_str().contains("Short description..."));
        assert!(!m.as_str().contains("style="));

        let item = WorkItem {
            title: "O'Neil".to_string(),
            poster_url: "posters/a'b.jpg".to_string(),
            ..Default::default()
        };
        let base = Url::parse("https://example.com/works/").unwrap();
        let m = work_card(&item, Some(&base));
        assert!(m.as_str().contains("O&#39;Neil"));
        assert!(m
            .as_str()
            .contains("background-image: url(&#39;https://example.com/works/posters/a\\&#39;b.jpg&#39;);"));
    }

    #[test]
    fn test_contact_links_escape() {
        let m = contact_links(&[ContactLink {
            href: "https://t.me/x?a=1&b=2".to_string(),
            label: "<Telegram>".to_string(),
        }]);
        assert_eq!(
            m.as_str(),
            r#"<li><a target="_blank" rel="noopener noreferrer" href="https://t.me/x?a=1&amp;b=2">&lt;Telegram&gt;</a></li>"#
        );
    }
}
