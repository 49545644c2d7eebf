//! Scroll container configuration
//!
//! Every field has a default, so a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! axis_mode = "vertical"
//! auto_scroll_to_end = true
//! min_thumb_length = 32.0
//!
//! [fade_width]
//! vertical = 16.0
//! ```
//!
//! Values are cosmetic. Anything malformed (negative, NaN) is normalized to a
//! safe floor instead of being rejected.

use std::fs;
use std::path::Path;
use std::time::Duration;

use glass_core::{Axis, GlassError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const DEFAULT_MIN_THUMB_LENGTH: f32 = 24.0;
pub const DEFAULT_HORIZONTAL_FADE: f32 = 40.0;
pub const DEFAULT_VERTICAL_FADE: f32 = 20.0;
pub const DEFAULT_EDGE_TOLERANCE: f32 = 2.0;
pub const DEFAULT_OVERFLOW_EPSILON: f32 = 1.0;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 50;

// ============================================================================
// Axis Mode
// ============================================================================

/// Which axes the container scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Horizontal scrolling only (default)
    #[default]
    Horizontal,
    /// Vertical scrolling only
    Vertical,
    /// Both axes, each with its own track
    Both,
}

impl AxisMode {
    /// Whether `axis` scrolls in this mode
    pub fn includes(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (AxisMode::Both, _)
                | (AxisMode::Horizontal, Axis::Horizontal)
                | (AxisMode::Vertical, Axis::Vertical)
        )
    }

    /// Active axes, horizontal first
    pub fn axes(self) -> SmallVec<[Axis; 2]> {
        Axis::ALL.into_iter().filter(|axis| self.includes(*axis)).collect()
    }

    /// The single active axis, if the mode has exactly one
    pub fn single(self) -> Option<Axis> {
        match self {
            AxisMode::Horizontal => Some(Axis::Horizontal),
            AxisMode::Vertical => Some(Axis::Vertical),
            AxisMode::Both => None,
        }
    }

    /// Whether content changes pin `axis` to its trailing edge when
    /// auto-scroll is enabled. Horizontal pinning only applies to the
    /// horizontal-only mode.
    pub fn auto_scrolls(self, axis: Axis) -> bool {
        match axis {
            Axis::Vertical => self.includes(Axis::Vertical),
            Axis::Horizontal => self == AxisMode::Horizontal,
        }
    }
}

// ============================================================================
// Fade and Track Layout
// ============================================================================

/// Edge fade width per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeWidths {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for FadeWidths {
    fn default() -> Self {
        Self {
            horizontal: DEFAULT_HORIZONTAL_FADE,
            vertical: DEFAULT_VERTICAL_FADE,
        }
    }
}

impl FadeWidths {
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Placement of the scrollbar tracks inside the container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLayout {
    /// Rail thickness
    pub thickness: f32,
    /// Gap between the rail and the container edge it runs along
    pub edge_gap: f32,
    /// Inset at both ends of the rail
    pub end_inset: f32,
    /// Trailing inset used when the other axis' rail is also showing
    pub corner_inset: f32,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            thickness: 6.0,
            edge_gap: 2.0,
            end_inset: 4.0,
            corner_inset: 12.0,
        }
    }
}

// ============================================================================
// Scroll Configuration
// ============================================================================

/// Configuration for one glass scroll container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub axis_mode: AxisMode,
    /// Pin to the trailing edge whenever content changes
    pub auto_scroll_to_end: bool,
    /// Floor for the thumb length so it stays grabbable
    pub min_thumb_length: f32,
    /// Distance from an edge that still counts as "at" the edge
    pub edge_tolerance: f32,
    /// Overflow slack absorbing sub-pixel layout rounding
    pub overflow_epsilon: f32,
    /// Delay before auto-scroll is re-applied after a content change
    pub settle_delay_ms: u64,
    pub fade_width: FadeWidths,
    pub track: TrackLayout,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axis_mode: AxisMode::Horizontal,
            auto_scroll_to_end: false,
            min_thumb_length: DEFAULT_MIN_THUMB_LENGTH,
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
            overflow_epsilon: DEFAULT_OVERFLOW_EPSILON,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            fade_width: FadeWidths::default(),
            track: TrackLayout::default(),
        }
    }
}

impl ScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis mode
    pub fn axis_mode(mut self, mode: AxisMode) -> Self {
        self.axis_mode = mode;
        self
    }

    /// Horizontal scrolling only
    pub fn horizontal(self) -> Self {
        self.axis_mode(AxisMode::Horizontal)
    }

    /// Vertical scrolling only
    pub fn vertical(self) -> Self {
        self.axis_mode(AxisMode::Vertical)
    }

    /// Scroll both axes
    pub fn both_directions(self) -> Self {
        self.axis_mode(AxisMode::Both)
    }

    pub fn auto_scroll_to_end(mut self, enabled: bool) -> Self {
        self.auto_scroll_to_end = enabled;
        self
    }

    pub fn min_thumb_length(mut self, length: f32) -> Self {
        self.min_thumb_length = length;
        self
    }

    /// Set the fade width for one axis
    pub fn fade_width(mut self, axis: Axis, width: f32) -> Self {
        match axis {
            Axis::Horizontal => self.fade_width.horizontal = width,
            Axis::Vertical => self.fade_width.vertical = width,
        }
        self
    }

    pub fn edge_tolerance(mut self, tolerance: f32) -> Self {
        self.edge_tolerance = tolerance;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Clamp every numeric field into its valid range
    ///
    /// Non-finite values fall back to their default, negative values to 0.
    /// The thumb floor falls back to its default on either, so the thumb
    /// stays grabbable.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        let track = TrackLayout::default();

        self.min_thumb_length = sanitize_floor(
            "min_thumb_length",
            self.min_thumb_length,
            DEFAULT_MIN_THUMB_LENGTH,
        );
        self.fade_width.horizontal = sanitize(
            "fade_width.horizontal",
            self.fade_width.horizontal,
            DEFAULT_HORIZONTAL_FADE,
        );
        self.fade_width.vertical = sanitize(
            "fade_width.vertical",
            self.fade_width.vertical,
            DEFAULT_VERTICAL_FADE,
        );
        self.edge_tolerance =
            sanitize("edge_tolerance", self.edge_tolerance, defaults.edge_tolerance);
        self.overflow_epsilon =
            sanitize("overflow_epsilon", self.overflow_epsilon, defaults.overflow_epsilon);
        self.track.thickness = sanitize("track.thickness", self.track.thickness, track.thickness);
        self.track.edge_gap = sanitize("track.edge_gap", self.track.edge_gap, track.edge_gap);
        self.track.end_inset = sanitize("track.end_inset", self.track.end_inset, track.end_inset);
        self.track.corner_inset =
            sanitize("track.corner_inset", self.track.corner_inset, track.corner_inset);
        self
    }

    /// Parse a TOML document. The result is normalized.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GlassError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Like `sanitize`, but negative values also fall back to the default
fn sanitize_floor(field: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(field, value, default, "invalid scroll config floor, using default");
        default
    }
}

fn sanitize(field: &str, value: f32, default: f32) -> f32 {
    if !value.is_finite() {
        tracing::warn!(field, value, default, "non-finite scroll config value, using default");
        default
    } else if value < 0.0 {
        tracing::warn!(field, value, "negative scroll config value, clamping to 0");
        0.0
    } else {
        value
    }
}
