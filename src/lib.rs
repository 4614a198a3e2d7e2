//! folio - portfolio site content loading and rendering.
//!
//! Loads the site's JSON content, projects it into HTML templates held as an
//! in-memory document tree, and drives the page widgets (image carousels and
//! click-to-play video previews) through simulated events.

pub mod config;
pub mod dom;
pub mod loader;
pub mod models;
pub mod page;
pub mod render;
pub mod site;
pub mod utils;
pub mod widgets;

pub use config::Settings;
pub use loader::{ContentLoader, LoadError};
pub use page::{Event, Page};
pub use render::{render_site, RenderOptions};
