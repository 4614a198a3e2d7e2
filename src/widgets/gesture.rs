//! Horizontal swipe detection.

/// Minimum horizontal travel, in pixels, for a release to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 40.0;

/// Direction a completed swipe asks the carousel to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger or pointer moved right: show the previous slide.
    Prev,
    /// Moved left: show the next slide.
    Next,
}

/// Press/release tracker. Holds at most one gesture at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn press(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn is_pressed(&self) -> bool {
        self.start_x.is_some()
    }

    /// End the gesture. The tracker is reset whatever the outcome.
    pub fn release(&mut self, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta > SWIPE_THRESHOLD {
            Some(Swipe::Prev)
        } else if delta < -SWIPE_THRESHOLD {
            Some(Swipe::Next)
        } else {
            None
        }
    }
}
