//! A rendered page: the document tree plus the widgets mounted on it.
//!
//! `Page` stands in for the browser event loop. Renderers mutate the
//! document and then call [`Page::mount_widgets`]; interaction is simulated
//! by dispatching [`Event`]s at nodes.

use scraper::Selector;
use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::widgets::carousel::CAROUSEL_SELECTOR;
use crate::widgets::preview::PREVIEW_SELECTOR;
use crate::widgets::{Carousel, ImageFallback, VideoPreview};

/// Input events widgets react to. Coordinates are client x positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click,
    PointerDown { x: f64 },
    PointerUp { x: f64 },
    TouchStart { touches: Vec<f64> },
    TouchEnd { changed_touches: Vec<f64> },
    /// Resource load failure (e.g. a broken image).
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    document: Document,
    carousels: Vec<Carousel>,
    previews: Vec<VideoPreview>,
    fallbacks: Vec<ImageFallback>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    /// Parse a template. Widgets already present in the markup are mounted.
    pub fn parse(html: &str) -> Self {
        let mut page = Self::new(Document::parse(html));
        let root = page.document.root();
        page.mount_widgets(root);
        page
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn previews(&self) -> &[VideoPreview] {
        &self.previews
    }

    /// The carousel mounted on `root`, if any.
    pub fn carousel_at(&self, root: NodeId) -> Option<&Carousel> {
        self.carousels.iter().find(|c| c.root() == root)
    }

    /// Drop widgets whose nodes left the document, then mount controllers on
    /// every carousel and preview root under `scope` (inclusive).
    pub fn mount_widgets(&mut self, scope: NodeId) {
        self.prune();

        let mut candidates = vec![scope];
        candidates.extend(self.document.descendants(scope));

        let carousel_roots = self.matching(&candidates, CAROUSEL_SELECTOR);
        for root in carousel_roots {
            if self.carousel_at(root).is_none() {
                let carousel = Carousel::mount(&mut self.document, root);
                self.carousels.push(carousel);
            }
        }

        let preview_buttons = self.matching(&candidates, PREVIEW_SELECTOR);
        for button in preview_buttons {
            if !self.previews.iter().any(|p| p.button() == button) {
                debug!("Mounting video preview");
                self.previews.push(VideoPreview::new(button));
            }
        }
    }

    /// Attach a one-shot load-failure fallback to an image. Repeated calls
    /// for the same node are ignored.
    pub fn watch_image_error(&mut self, image: NodeId) {
        self.prune();
        if self.fallbacks.iter().any(|f| f.image() == image) {
            return;
        }
        self.fallbacks.push(ImageFallback::new(image));
    }

    /// Deliver an event targeted at `target`. Returns whether any widget
    /// reacted. Pointer releases also go to page-level listeners.
    pub fn dispatch(&mut self, target: NodeId, event: &Event) -> bool {
        let mut handled = false;

        for carousel in &mut self.carousels {
            handled |= carousel.handle(&mut self.document, target, event);
        }
        for preview in &mut self.previews {
            handled |= preview.handle(&mut self.document, target, event);
        }
        for fallback in &mut self.fallbacks {
            handled |= fallback.handle(&mut self.document, target, event);
        }

        if matches!(event, Event::PointerUp { .. }) {
            handled |= self.dispatch_window(event);
        }
        handled
    }

    /// Deliver a page-level event, such as a pointer released outside any
    /// widget.
    pub fn dispatch_window(&mut self, event: &Event) -> bool {
        let mut handled = false;
        for carousel in &mut self.carousels {
            handled |= carousel.handle_window(&mut self.document, event);
        }
        handled
    }

    fn matching(&self, candidates: &[NodeId], selector: &str) -> Vec<NodeId> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        candidates
            .iter()
            .copied()
            .filter(|id| self.document.matches(*id, &selector))
            .collect()
    }

    fn prune(&mut self) {
        let doc = &self.document;
        let before = self.carousels.len() + self.previews.len() + self.fallbacks.len();

        self.carousels.retain(|c| doc.is_attached(c.root()));
        // An activated preview lives on through its player.
        self.previews
            .retain(|p| doc.is_attached(p.player().unwrap_or(p.button())));
        self.fallbacks.retain(|f| doc.is_attached(f.image()));

        let dropped = before - (self.carousels.len() + self.previews.len() + self.fallbacks.len());
        if dropped > 0 {
            debug!("Dropped {} widget(s) from replaced markup", dropped);
        }
    }
}
