//! Interactive page widgets.
//!
//! Each widget owns only its own state and the node ids it drives; the
//! document itself is borrowed per event from the [`Page`](crate::page::Page).

pub mod carousel;
mod fallback;
mod gesture;
pub mod preview;

pub use carousel::{Carousel, CarouselParts, CarouselState};
pub use fallback::ImageFallback;
pub use gesture::{Swipe, SwipeTracker, SWIPE_THRESHOLD};
pub use preview::{Activation, VideoPreview};
