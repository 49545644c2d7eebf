//! Edge fade masks
//!
//! When more content lies beyond an edge of the viewport, that edge fades to
//! transparent. The mask is a declarative gradient (direction plus stops)
//! that renders to a CSS `linear-gradient(...)` through `Display`, or can be
//! sampled directly with [`FadeMask::opacity_at`].

use std::fmt;

use glass_core::Axis;
use smallvec::SmallVec;

use crate::geometry::ViewportMetrics;

/// Which edges of an axis are faded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeEdges {
    None,
    Leading,
    Trailing,
    Both,
}

/// Classify the scroll position against both edges
pub fn fade_edges(metrics: ViewportMetrics, tolerance: f32) -> FadeEdges {
    let at_start = metrics.scroll_offset <= tolerance;
    let at_end =
        metrics.scroll_offset + metrics.visible_extent >= metrics.content_extent - tolerance;

    match (at_start, at_end) {
        (true, true) => FadeEdges::None,
        (false, false) => FadeEdges::Both,
        (false, true) => FadeEdges::Leading,
        (true, false) => FadeEdges::Trailing,
    }
}

/// Gradient direction, from the leading edge toward the trailing edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    ToRight,
    ToBottom,
}

impl GradientDirection {
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => GradientDirection::ToRight,
            Axis::Vertical => GradientDirection::ToBottom,
        }
    }
}

/// Mask coverage at a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskAlpha {
    Transparent,
    Opaque,
}

impl MaskAlpha {
    fn value(self) -> f32 {
        match self {
            MaskAlpha::Transparent => 0.0,
            MaskAlpha::Opaque => 1.0,
        }
    }
}

/// Where a stop sits along the gradient line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopPosition {
    /// Leading edge of the viewport
    Start,
    /// Fixed distance from the leading edge
    FromStart(f32),
    /// Fixed distance from the trailing edge
    FromEnd(f32),
    /// Trailing edge of the viewport
    End,
}

impl StopPosition {
    /// Resolve against the visible extent
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            StopPosition::Start => 0.0,
            StopPosition::FromStart(d) => d,
            StopPosition::FromEnd(d) => extent - d,
            StopPosition::End => extent,
        }
    }
}

/// A single gradient stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStop {
    pub alpha: MaskAlpha,
    pub position: StopPosition,
}

impl MaskStop {
    fn new(alpha: MaskAlpha, position: StopPosition) -> Self {
        Self { alpha, position }
    }
}

/// Edge fade descriptor for one axis
#[derive(Debug, Clone, PartialEq)]
pub struct FadeMask {
    pub direction: GradientDirection,
    pub edges: FadeEdges,
    pub stops: SmallVec<[MaskStop; 4]>,
}

impl FadeMask {
    /// Build the mask for a set of faded edges. `FadeEdges::None` has no mask.
    pub fn new(axis: Axis, edges: FadeEdges, fade_width: f32) -> Option<Self> {
        use MaskAlpha::*;
        use StopPosition::*;

        let stops: SmallVec<[MaskStop; 4]> = match edges {
            FadeEdges::None => return None,
            FadeEdges::Leading => [
                MaskStop::new(Transparent, Start),
                MaskStop::new(Opaque, FromStart(fade_width)),
            ]
            .into_iter()
            .collect(),
            FadeEdges::Trailing => [
                MaskStop::new(Opaque, FromEnd(fade_width)),
                MaskStop::new(Transparent, End),
            ]
            .into_iter()
            .collect(),
            FadeEdges::Both => [
                MaskStop::new(Transparent, Start),
                MaskStop::new(Opaque, FromStart(fade_width)),
                MaskStop::new(Opaque, FromEnd(fade_width)),
                MaskStop::new(Transparent, End),
            ]
            .into_iter()
            .collect(),
        };

        Some(Self {
            direction: GradientDirection::for_axis(axis),
            edges,
            stops,
        })
    }

    /// Mask opacity at `position` along a viewport of length `extent`
    ///
    /// Linear between stops; clamps to the first and last stop outside them.
    pub fn opacity_at(&self, position: f32, extent: f32) -> f32 {
        let mut previous: Option<(f32, f32)> = None;
        for stop in &self.stops {
            let at = stop.position.resolve(extent);
            let alpha = stop.alpha.value();
            match previous {
                None if position <= at => return alpha,
                Some((prev_at, prev_alpha)) if position <= at => {
                    let span = at - prev_at;
                    if span <= 0.0 {
                        return alpha;
                    }
                    let t = (position - prev_at) / span;
                    return prev_alpha + (alpha - prev_alpha) * t;
                }
                _ => {}
            }
            previous = Some((at, alpha));
        }
        previous.map(|(_, alpha)| alpha).unwrap_or(1.0)
    }
}

impl fmt::Display for FadeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            GradientDirection::ToRight => "to right",
            GradientDirection::ToBottom => "to bottom",
        };
        write!(f, "linear-gradient({direction}")?;
        for stop in &self.stops {
            let color = match stop.alpha {
                MaskAlpha::Transparent => "transparent",
                MaskAlpha::Opaque => "black",
            };
            match stop.position {
                StopPosition::Start | StopPosition::End => write!(f, ", {color}")?,
                StopPosition::FromStart(d) => write!(f, ", {color} {d}px")?,
                StopPosition::FromEnd(d) => write!(f, ", {color} calc(100% - {d}px)")?,
            }
        }
        write!(f, ")")
    }
}

/// Derive the fade mask for an axis from its live metrics
pub fn fade_mask(
    axis: Axis,
    metrics: ViewportMetrics,
    fade_width: f32,
    tolerance: f32,
) -> Option<FadeMask> {
    FadeMask::new(axis, fade_edges(metrics, tolerance), fade_width)
}
