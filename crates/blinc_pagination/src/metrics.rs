//! Per-notification viewport snapshot.

use crate::direction::Direction;
use crate::geometry::{Point, Size};

/// Viewport geometry captured for a single offset change.
///
/// Built by the host adapter for each notification and dropped once the
/// prefetch decision has been made.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Size of the visible viewport.
    pub viewport: Size,
    /// Total size of the scrollable content.
    pub content_size: Size,
    /// Content offset before the change.
    pub old_offset: Point,
    /// Content offset after the change.
    pub new_offset: Point,
    /// Whether the viewport is currently on screen.
    pub visible: bool,
    /// Whether the viewport renders right-to-left.
    pub rtl: bool,
    /// Whether the layout already mirrors itself in right-to-left mode.
    pub flips_in_rtl: bool,
}

impl ScrollMetrics {
    /// Create visible, left-to-right metrics.
    pub fn new(viewport: Size, content_size: Size, old_offset: Point, new_offset: Point) -> Self {
        Self {
            viewport,
            content_size,
            old_offset,
            new_offset,
            visible: true,
            rtl: false,
            flips_in_rtl: false,
        }
    }

    /// Metrics for a viewport already resting at `offset`.
    pub fn at_rest(viewport: Size, content_size: Size, offset: Point) -> Self {
        Self::new(viewport, content_size, offset, offset)
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set right-to-left layout direction.
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Set whether the layout flips itself in right-to-left mode.
    pub fn with_flips_in_rtl(mut self, flips: bool) -> Self {
        self.flips_in_rtl = flips;
        self
    }

    /// Directions of motion between the old and new offsets.
    pub fn direction(&self) -> Direction {
        Direction::between(self.old_offset, self.new_offset)
    }
}
