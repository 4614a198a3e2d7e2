//! Shared utility functions.
//!
//! This module contains reusable utilities used across the codebase:
//! - `html`: HTML escaping and the trusted `Markup` type
//! - `urls`: embed autoplay parameters, base URL resolution, CSS url values

mod html;
mod urls;

pub use html::{html_escape, Markup};
pub use urls::{css_url, resolve_url, with_autoplay};
