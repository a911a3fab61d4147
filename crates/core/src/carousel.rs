//! Featured-film carousel state.
//!
//! The home page carousel cycles through a fixed set of featured films. The
//! server sends the films plus the initial state; the same rules drive the
//! client so the first render matches.

use std::time::Duration;

use serde::Serialize;

/// Horizontal drag distance (in CSS pixels) that counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Default time between automatic advances.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carousel {
    len: usize,
    index: usize,
    #[serde(rename = "autoplay_interval_ms", serialize_with = "as_millis")]
    autoplay_interval: Duration,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
        }
    }

    pub fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval = interval;
        self
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

    pub fn autoplay_interval(&self) -> Duration {
        self.autoplay_interval
    }

    /// Advance one slide, wrapping to the first after the last.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Go back one slide, wrapping to the last before the first.
    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Jump to a slide. Out-of-range indices clamp to the last slide.
    pub fn go_to(&mut self, index: usize) -> usize {
        if self.len > 0 {
            self.index = index.min(self.len - 1);
        }
        self.index
    }

    /// Apply a horizontal drag.
    ///
    /// Dragging left (negative `delta_x`) past the threshold shows the next
    /// slide, dragging right shows the previous one; shorter drags are ignored.
    pub fn swipe(&mut self, delta_x: f64) -> usize {
        if delta_x <= -SWIPE_THRESHOLD_PX {
            self.next()
        } else if delta_x >= SWIPE_THRESHOLD_PX {
            self.prev()
        } else {
            self.index
        }
    }

    /// Indices of `count` consecutive slides starting at the current one.
    pub fn visible_window(&self, count: usize) -> Vec<usize> {
        if self.len == 0 {
            return Vec::new();
        }
        (0..count.min(self.len))
            .map(|offset| (self.index + offset) % self.len)
            .collect()
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
