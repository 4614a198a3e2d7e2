//! Click-to-load video previews.
//!
//! A preview is a poster button carrying the embed URL in `data-embed`. The
//! player iframe is only built on the first click, which replaces the button.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::page::Event;
use crate::utils::with_autoplay;

pub const PREVIEW_SELECTOR: &str = "[data-video-preview]";

/// Permissions granted to embedded players.
pub const PLAYER_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

const PLAYER_CLASS: &str = "work-video-iframe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Idle,
    Activated,
}

#[derive(Debug, Clone)]
pub struct VideoPreview {
    button: NodeId,
    state: Activation,
    player: Option<NodeId>,
}

impl VideoPreview {
    pub fn new(button: NodeId) -> Self {
        Self {
            button,
            state: Activation::Idle,
            player: None,
        }
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    pub fn state(&self) -> Activation {
        self.state
    }

    pub fn player(&self) -> Option<NodeId> {
        self.player
    }

    /// Handle a click on (or inside) the preview button.
    pub fn handle(&mut self, doc: &mut Document, target: NodeId, event: &Event) -> bool {
        if !matches!(event, Event::Click) || self.state == Activation::Activated {
            return false;
        }
        if !doc.contains(self.button, target) {
            return false;
        }
        self.activate(doc);
        true
    }

    /// Swap the button for the player. Only the first call does anything.
    ///
    /// An empty `data-embed` still uses up the activation but mounts nothing.
    pub fn activate(&mut self, doc: &mut Document) -> Option<NodeId> {
        if self.state == Activation::Activated {
            return None;
        }
        self.state = Activation::Activated;

        let embed = doc.attr(self.button, "data-embed").unwrap_or("").to_string();
        if embed.is_empty() {
            debug!("Video preview has no embed URL; nothing to mount");
            return None;
        }

        let src = with_autoplay(&embed);
        let title = doc
            .attr(self.button, "aria-label")
            .filter(|t| !t.is_empty())
            .unwrap_or("Video")
            .to_string();

        let player = doc.create_element(
            "iframe",
            &[
                ("src", src.as_str()),
                ("title", title.as_str()),
                ("frameborder", "0"),
                ("allow", PLAYER_ALLOW),
                ("allowfullscreen", ""),
                ("class", PLAYER_CLASS),
            ],
        );
        doc.replace_with(self.button, player);
        self.player = Some(player);
        Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_preview(embed: &str) -> (Document, NodeId) {
        let html = format!(
            r#"<html><body><div class="work-card-media"><button class="video-preview" type="button" data-video-preview data-embed="{}" aria-label="Play: Reel"><span class="video-preview__play"></span></button></div></body></html>"#,
            crate::utils::html_escape(embed)
        );
        let doc = Document::parse(&html);
        let button = doc.query(PREVIEW_SELECTOR).unwrap();
        (doc, button)
    }

    #[test]
    fn test_first_click_mounts_player() {
        let (mut doc, button) = doc_with_preview("https://www.youtube.com/embed/abc");
        let mut preview = VideoPreview::new(button);
        let span = doc.query(".video-preview__play").unwrap();

        assert!(preview.handle(&mut doc, span, &Event::Click));
        assert_eq!(preview.state(), Activation::Activated);

        let iframe = doc.query("iframe.work-video-iframe").unwrap();
        assert_eq!(
            doc.attr(iframe, "src"),
            Some("https://www.youtube.com/embed/abc?autoplay=1&playsinline=1&rel=0")
        );
        assert_eq!(doc.attr(iframe, "title"), Some("Play: Reel"));
        assert!(!doc.is_attached(button));
        assert!(doc.query(PREVIEW_SELECTOR).is_none());
    }

    #[test]
    fn test_second_click_has_no_handler() {
        let (mut doc, button) = doc_with_preview("https://www.youtube.com/embed/abc");
        let mut preview = VideoPreview::new(button);
        assert!(preview.handle(&mut doc, button, &Event::Click));
        assert!(!preview.handle(&mut doc, button, &Event::Click));
        assert!(preview.activate(&mut doc).is_none());
        assert_eq!(doc.query_all_in(doc.root(), "iframe").len(), 1);
    }

    #[test]
    fn test_malformed_embed_passes_through() {
        let (mut doc, button) = doc_with_preview("not a url <script>");
        let mut preview = VideoPreview::new(button);
        let player = preview.activate(&mut doc).unwrap();
        assert_eq!(doc.attr(player, "src"), Some("not a url <script>"));
    }

    #[test]
    fn test_empty_embed_consumes_activation() {
        let (mut doc, button) = doc_with_preview("");
        let mut preview = VideoPreview::new(button);
        assert!(preview.handle(&mut doc, button, &Event::Click));
        assert!(preview.player().is_none());
        assert!(doc.is_attached(button));
        assert!(!preview.handle(&mut doc, button, &Event::Click));
    }

    #[test]
    fn test_other_events_ignored() {
        let (mut doc, button) = doc_with_preview("https://example.com/v");
        let mut preview = VideoPreview::new(button);
        assert!(!preview.handle(&mut doc, button, &Event::PointerDown { x: 1.0 }));
        assert_eq!(preview.state(), Activation::Idle);
    }
}
