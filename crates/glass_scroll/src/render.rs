//! Render snapshot
//!
//! Everything a host needs to draw the container for the current frame:
//! the content area's overflow policy and edge mask, and one scrollbar per
//! scrolling axis. Snapshots are plain values, rebuilt on demand.

use glass_core::Axis;

use crate::fade::FadeMask;

/// Native overflow policy for one axis of the content area
///
/// The native scrollbar is always hidden; `Auto` only means the axis can
/// be scrolled by wheel, trackpad, keyboard or the synthetic thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowStyle {
    Auto,
    Hidden,
}

/// Cursor hint for the thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentRenderInfo {
    pub overflow_x: OverflowStyle,
    pub overflow_y: OverflowStyle,
    /// Edge fade; only set in single-axis modes
    pub mask: Option<FadeMask>,
}

impl ContentRenderInfo {
    pub fn overflow(&self, axis: Axis) -> OverflowStyle {
        match axis {
            Axis::Horizontal => self.overflow_x,
            Axis::Vertical => self.overflow_y,
        }
    }
}

/// Track placement inside the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackInsets {
    /// Inset at the leading end of the rail
    pub leading: f32,
    /// Inset at the trailing end of the rail
    pub trailing: f32,
    /// Gap to the container edge the rail runs along
    pub edge_gap: f32,
    pub thickness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbRenderInfo {
    pub length: f32,
    pub offset: f32,
    pub dragging: bool,
    pub cursor: Cursor,
    /// Animate offset changes; off while dragging so the thumb tracks the
    /// pointer exactly
    pub animate_position: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarRenderInfo {
    pub axis: Axis,
    pub visible: bool,
    /// Hidden tracks let pointer events pass through
    pub interactive: bool,
    pub insets: TrackInsets,
    /// Present only while the axis overflows
    pub thumb: Option<ThumbRenderInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRenderInfo {
    pub content: ContentRenderInfo,
    pub horizontal: Option<ScrollbarRenderInfo>,
    pub vertical: Option<ScrollbarRenderInfo>,
}

impl ScrollRenderInfo {
    pub fn scrollbar(&self, axis: Axis) -> Option<&ScrollbarRenderInfo> {
        match axis {
            Axis::Horizontal => self.horizontal.as_ref(),
            Axis::Vertical => self.vertical.as_ref(),
        }
    }

    /// Thumb for `axis`, if its scrollbar exists and the axis overflows
    pub fn thumb(&self, axis: Axis) -> Option<&ThumbRenderInfo> {
        self.scrollbar(axis).and_then(|bar| bar.thumb.as_ref())
    }
}
