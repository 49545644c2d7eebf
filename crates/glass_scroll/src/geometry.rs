//! Scrollbar thumb geometry
//!
//! The thumb's length mirrors the visible fraction of the content and its
//! offset mirrors the scroll progress:
//!
//! ```text
//! length = max(visible / content * track, min_thumb_length)
//! offset = scroll / (content - visible) * (track - length)
//! ```
//!
//! Dragging runs the offset formula backwards. The drag mapping is frozen
//! when a drag starts so that re-measuring mid-drag can't desynchronize the
//! pointer from the content.

use glass_core::{Axis, ScrollViewport};

/// Live extents of the content area along one axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportMetrics {
    pub content_extent: f32,
    pub visible_extent: f32,
    pub scroll_offset: f32,
}

impl ViewportMetrics {
    pub fn new(content_extent: f32, visible_extent: f32, scroll_offset: f32) -> Self {
        Self {
            content_extent,
            visible_extent,
            scroll_offset,
        }
    }

    /// Read the current metrics from the host
    pub fn read(viewport: &dyn ScrollViewport, axis: Axis) -> Self {
        Self {
            content_extent: viewport.content_extent(axis),
            visible_extent: viewport.visible_extent(axis),
            scroll_offset: viewport.scroll_offset(axis),
        }
    }

    /// Scroll range, never negative
    pub fn max_scroll(&self) -> f32 {
        (self.content_extent - self.visible_extent).max(0.0)
    }

    /// Visible fraction of the content, in [0, 1]
    pub fn visible_ratio(&self) -> f32 {
        if self.content_extent > 0.0 && self.content_extent.is_finite() {
            (self.visible_extent / self.content_extent).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Scroll progress, in [0, 1]; 0 when there is no scroll range
    pub fn scroll_ratio(&self) -> f32 {
        let max_scroll = self.max_scroll();
        if max_scroll > 0.0 {
            (self.scroll_offset / max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Thumb length and offset along its track
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThumbGeometry {
    pub length: f32,
    pub offset: f32,
}

impl ThumbGeometry {
    /// Space the thumb can travel within a track
    pub fn max_travel(&self, track_extent: f32) -> f32 {
        (track_extent - self.length).max(0.0)
    }
}

/// Calculate thumb geometry for one axis
pub fn thumb_geometry(
    metrics: ViewportMetrics,
    track_extent: f32,
    min_thumb_length: f32,
) -> ThumbGeometry {
    let track_extent = track_extent.max(0.0);
    let length = (metrics.visible_ratio() * track_extent).max(min_thumb_length);

    let max_travel = (track_extent - length).max(0.0);
    let offset = metrics.scroll_ratio() * max_travel;

    ThumbGeometry { length, offset }
}

/// Pointer-to-scroll mapping captured at drag start
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragMapping {
    pub max_thumb_travel: f32,
    pub max_scroll: f32,
}

impl DragMapping {
    /// Freeze the mapping for the current metrics and track
    pub fn capture(metrics: ViewportMetrics, track_extent: f32, min_thumb_length: f32) -> Self {
        let thumb = thumb_geometry(metrics, track_extent, min_thumb_length);
        Self {
            max_thumb_travel: thumb.max_travel(track_extent),
            max_scroll: metrics.max_scroll(),
        }
    }

    /// Scroll distance corresponding to a pointer movement along the track
    pub fn scroll_delta(&self, pointer_delta: f32) -> f32 {
        if self.max_thumb_travel > 0.0 {
            (pointer_delta / self.max_thumb_travel) * self.max_scroll
        } else {
            0.0
        }
    }

    /// Thumb distance corresponding to a scroll movement
    pub fn thumb_delta(&self, scroll_delta: f32) -> f32 {
        if self.max_scroll > 0.0 {
            (scroll_delta / self.max_scroll) * self.max_thumb_travel
        } else {
            0.0
        }
    }
}
