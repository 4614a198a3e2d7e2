//! One-shot image load-failure handling.

use tracing::warn;

use crate::dom::{Document, NodeId};
use crate::page::Event;

/// Clears an image's `alt` text the first time it fails to load, so a broken
/// avatar does not show its caption inside the frame.
#[derive(Debug, Clone)]
pub struct ImageFallback {
    image: NodeId,
    fired: bool,
}

impl ImageFallback {
    pub fn new(image: NodeId) -> Self {
        Self { image, fired: false }
    }

    pub fn image(&self) -> NodeId {
        self.image
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn handle(&mut self, doc: &mut Document, target: NodeId, event: &Event) -> bool {
        if self.fired || target != self.image || !matches!(event, Event::Error) {
            return false;
        }
        self.fired = true;
        warn!(
            "Image {} failed to load; clearing alt text",
            doc.attr(self.image, "src").unwrap_or("")
        );
        doc.set_attr(self.image, "alt", "");
        true
    }
}
