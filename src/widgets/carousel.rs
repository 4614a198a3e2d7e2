//! Image carousel controller.
//!
//! One controller per `[data-carousel]` root. The only state is the slide
//! index; every transition re-applies the track offset, the dot indicators
//! and the prev/next disabled flags.

use tracing::debug;

use super::gesture::{Swipe, SwipeTracker};
use crate::dom::{Document, NodeId};
use crate::page::Event;

pub const CAROUSEL_SELECTOR: &str = "[data-carousel]";
pub const TRACK_SELECTOR: &str = "[data-carousel-track]";
pub const VIEWPORT_SELECTOR: &str = "[data-carousel-viewport]";
pub const DOTS_SELECTOR: &str = "[data-carousel-dots]";
pub const PREV_SELECTOR: &str = "[data-carousel-prev]";
pub const NEXT_SELECTOR: &str = "[data-carousel-next]";
pub const SLIDE_SELECTOR: &str = ".carousel-slide";

const DOT_CLASS: &str = "carousel-dot";
const ACTIVE_CLASS: &str = "is-active";

/// Slide index clamped into `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    index: usize,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.len == 0 || self.index == self.len - 1
    }

    /// Move to `target`, clamped. Returns whether the index changed.
    pub fn goto(&mut self, target: isize) -> bool {
        if self.len == 0 {
            return false;
        }
        let max = (self.len - 1) as isize;
        let clamped = target.clamp(0, max) as usize;
        let changed = clamped != self.index;
        self.index = clamped;
        changed
    }

    pub fn prev(&mut self) -> bool {
        self.goto(self.index as isize - 1)
    }

    pub fn next(&mut self) -> bool {
        self.goto(self.index as isize + 1)
    }
}

/// The DOM pieces a carousel drives. Only `root` is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselParts {
    pub root: NodeId,
    pub track: Option<NodeId>,
    pub viewport: Option<NodeId>,
    pub slides: Vec<NodeId>,
    pub dots: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}

impl CarouselParts {
    /// Find the parts under a carousel root by their data attributes.
    pub fn discover(doc: &Document, root: NodeId) -> Self {
        let track = doc.query_in(root, TRACK_SELECTOR);
        let slides = track
            .map(|t| doc.query_all_in(t, SLIDE_SELECTOR))
            .unwrap_or_default();

        Self {
            root,
            track,
            viewport: doc.query_in(root, VIEWPORT_SELECTOR),
            slides,
            dots: doc.query_in(root, DOTS_SELECTOR),
            prev: doc.query_in(root, PREV_SELECTOR),
            next: doc.query_in(root, NEXT_SELECTOR),
        }
    }
}

/// A mounted carousel.
#[derive(Debug, Clone)]
pub struct Carousel {
    parts: CarouselParts,
    state: CarouselState,
    swipe: SwipeTracker,
}

impl Carousel {
    /// Take control of `parts` and render the initial state (slide 0).
    pub fn new(doc: &mut Document, parts: CarouselParts) -> Self {
        let carousel = Self {
            state: CarouselState::new(parts.slides.len()),
            parts,
            swipe: SwipeTracker::default(),
        };
        carousel.render(doc);
        carousel
    }

    /// Discover the parts under `root` and mount.
    pub fn mount(doc: &mut Document, root: NodeId) -> Self {
        let parts = CarouselParts::discover(doc, root);
        debug!("Mounting carousel with {} slide(s)", parts.slides.len());
        Self::new(doc, parts)
    }

    pub fn root(&self) -> NodeId {
        self.parts.root
    }

    pub fn parts(&self) -> &CarouselParts {
        &self.parts
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn goto(&mut self, doc: &mut Document, index: isize) {
        self.state.goto(index);
        self.render(doc);
    }

    pub fn prev(&mut self, doc: &mut Document) {
        self.state.prev();
        self.render(doc);
    }

    pub fn next(&mut self, doc: &mut Document) {
        self.state.next();
        self.render(doc);
    }

    /// Handle an event targeted at `target`. Returns true when consumed.
    ///
    /// Empty carousels ignore everything.
    pub fn handle(&mut self, doc: &mut Document, target: NodeId, event: &Event) -> bool {
        if self.is_empty() || !doc.contains(self.parts.root, target) {
            return false;
        }

        match event {
            Event::Click => {
                if self.part_contains(doc, self.parts.prev, target) {
                    self.prev(doc);
                    true
                } else if self.part_contains(doc, self.parts.next, target) {
                    self.next(doc);
                    true
                } else if let Some(i) = self.dot_index(doc, target) {
                    self.goto(doc, i as isize);
                    true
                } else {
                    false
                }
            }
            Event::PointerDown { x } if self.part_contains(doc, self.parts.viewport, target) => {
                self.swipe.press(*x);
                true
            }
            Event::TouchStart { touches } if self.part_contains(doc, self.parts.viewport, target) => {
                match touches.first() {
                    Some(x) => {
                        self.swipe.press(*x);
                        true
                    }
                    None => false,
                }
            }
            Event::TouchEnd { changed_touches } if self.part_contains(doc, self.parts.viewport, target) => {
                match changed_touches.first() {
                    Some(x) => {
                        let x = *x;
                        self.release(doc, x)
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Handle a page-level event (pointer released anywhere).
    pub fn handle_window(&mut self, doc: &mut Document, event: &Event) -> bool {
        match event {
            Event::PointerUp { x } if !self.is_empty() => self.release(doc, *x),
            _ => false,
        }
    }

    fn release(&mut self, doc: &mut Document, x: f64) -> bool {
        let was_pressed = self.swipe.is_pressed();
        match self.swipe.release(x) {
            Some(Swipe::Prev) => self.prev(doc),
            Some(Swipe::Next) => self.next(doc),
            None => {}
        }
        was_pressed
    }

    fn part_contains(&self, doc: &Document, part: Option<NodeId>, target: NodeId) -> bool {
        part.is_some_and(|p| doc.contains(p, target))
    }

    /// Position of the dot that contains `target`.
    fn dot_index(&self, doc: &Document, target: NodeId) -> Option<usize> {
        let dots = self.parts.dots?;
        let mut current = target;
        while let Some(parent) = doc.parent(current) {
            if parent == dots {
                return doc.child_elements(dots).iter().position(|d| *d == current);
            }
            current = parent;
        }
        None
    }

    fn render(&self, doc: &mut Document) {
        let index = self.state.index();

        if let Some(track) = self.parts.track {
            let offset = -(index as i64) * 100;
            doc.set_style_property(track, "transform", Some(&format!("translateX({}%)", offset)));
        }

        self.render_dots(doc);

        if let Some(prev) = self.parts.prev {
            doc.set_flag(prev, "disabled", self.state.at_start());
        }
        if let Some(next) = self.parts.next {
            doc.set_flag(next, "disabled", self.state.at_end());
        }
    }

    fn render_dots(&self, doc: &mut Document) {
        let Some(dots) = self.parts.dots else {
            return;
        };
        doc.clear_children(dots);

        for i in 0..self.state.len() {
            let class = if i == self.state.index() {
                format!("{} {}", DOT_CLASS, ACTIVE_CLASS)
            } else {
                DOT_CLASS.to_string()
            };
            let label = format!("Go to slide {}", i + 1);
            let dot = doc.create_element(
                "button",
                &[
                    ("type", "button"),
                    ("class", class.as_str()),
                    ("aria-label", label.as_str()),
                ],
            );
            doc.append_child(dots, dot);
        }
    }
}
