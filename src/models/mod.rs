//! Typed content schema.
//!
//! Documents are converted from JSON once, at load time, with every field
//! defaulted; renderers never deal with missing data.

mod content;
pub mod lenient;
mod works;

pub use content::{ContactLink, Contacts, ContentDocument, Hero, Home, Intro, Section, Site};
pub use works::{WorkItem, WorksDocument, WorksHero};

/// Both documents a page render needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContent {
    pub content: ContentDocument,
    pub works: WorksDocument,
}
