//! Overflow detection
//!
//! An axis overflows when its content is longer than the viewport by more
//! than a small epsilon, so sub-pixel rounding from the host layout engine
//! doesn't flicker the scrollbar on and off.

/// Whether content overflows the viewport along one axis
pub fn is_overflowing(content_extent: f32, visible_extent: f32, epsilon: f32) -> bool {
    content_extent > visible_extent + epsilon
}

/// Change in an axis' overflow state between two measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowChange {
    Unchanged,
    /// Started overflowing; geometry measured so far is stale
    Rising,
    /// Stopped overflowing
    Falling,
}

/// Per-axis overflow state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowDetector {
    overflowing: bool,
}

impl OverflowDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_overflowing(&self) -> bool {
        self.overflowing
    }

    /// Record a new measurement and report how the state changed
    pub fn update(
        &mut self,
        content_extent: f32,
        visible_extent: f32,
        epsilon: f32,
    ) -> OverflowChange {
        let now = is_overflowing(content_extent, visible_extent, epsilon);
        let change = match (self.overflowing, now) {
            (false, true) => OverflowChange::Rising,
            (true, false) => OverflowChange::Falling,
            _ => OverflowChange::Unchanged,
        };
        self.overflowing = now;
        change
    }

    pub fn reset(&mut self) {
        self.overflowing = false;
    }
}
