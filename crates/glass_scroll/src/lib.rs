//! Glass Scroll
//!
//! A scroll container with a synthetic "glass" scrollbar, built for the
//! display strips of a desktop calculator.
//!
//! # Features
//!
//! - **Overflow detection**: per axis, with a small epsilon for sub-pixel
//!   layout noise
//! - **Thumb geometry**: length and offset mirror the visible fraction and
//!   scroll progress, with a grabbable minimum length
//! - **Thumb dragging**: pointer movement maps back to content scroll through
//!   geometry frozen at drag start
//! - **Edge fades**: gradient masks on edges with more content beyond them
//! - **Auto-scroll to end**: pin to the trailing edge whenever content changes
//!
//! The container never touches a real UI runtime. Everything it needs (the
//! content area, size and mutation observers, a scheduler) is injected
//! through [`ScrollHost`] and [`glass_core::ScrollViewport`].

pub mod config;
pub mod drag;
pub mod fade;
pub mod geometry;
pub mod observer;
pub mod overflow;
pub mod render;
pub mod scroll;

pub use config::{AxisMode, FadeWidths, ScrollConfig, TrackLayout};
pub use drag::{DragController, DragSession, DragState};
pub use fade::{
    fade_edges, fade_mask, FadeEdges, FadeMask, GradientDirection, MaskAlpha, MaskStop,
    StopPosition,
};
pub use geometry::{thumb_geometry, DragMapping, ThumbGeometry, ViewportMetrics};
pub use observer::ViewportObserver;
pub use overflow::{is_overflowing, OverflowChange, OverflowDetector};
pub use render::{
    ContentRenderInfo, Cursor, OverflowStyle, ScrollRenderInfo, ScrollbarRenderInfo,
    ThumbRenderInfo, TrackInsets,
};
pub use scroll::{GlassScroll, ScrollHost, ScrollPart};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AxisMode, ScrollConfig};
    pub use crate::render::{Cursor, ScrollRenderInfo};
    pub use crate::scroll::{GlassScroll, ScrollHost, ScrollPart};
    pub use glass_core::{Axis, ElementId, Event, Point, PointerId, ScrollViewport, Size};
}
