//! Plot layout engine: content-rect inset, coordinate mapping, auto-range
//! helpers, tick generation and axis-label placement.
//!
//! # Content Rect
//!
//! A plot's outer bounds include room for axis tick labels. The drawable
//! area, the *content rect*, is inset from the outer bounds:
//!
//! ```text
//! left   = 6 * label_size + 4   (one y label)      when labels shown
//! bottom = 8 * label_size + 4   (one row of x labels)
//! top    = 2, right = 2
//! all    = 2                                        when labels hidden
//! ```
//!
//! Content width/height never go below 1px, so the linear mapping is
//! always well-defined even for absurdly small outer boxes.
//!
//! # Coordinate Mapping
//!
//! `map_x`/`map_y` are the only place data-to-pixel conversion happens;
//! tick values come from running the same mapping in reverse. The y axis
//! is inverted because pixel rows grow downward.
//!
//! # Label Collision Avoidance
//!
//! Along each axis, a label is only drawn if it clears the previously
//! drawn label by at least 2px in the axis direction. Skipped labels keep
//! their tick and gridline; only the text is suppressed.

use core::fmt::Write as _;

use crate::asset::AssetBase;
use crate::config::{CHAR_HEIGHT, CHAR_WIDTH, MAX_AXIS_TICKS, TINY_LABEL_AUTO_THRESHOLD};
use crate::surface::DrawSurface;
use crate::widgets::plot::tiny_font;

/// Text buffer for one formatted tick label.
pub type LabelBuf = heapless::String<12>;

/// Tick pixel offsets along one content dimension.
pub type TickOffsets = heapless::Vec<i16, MAX_AXIS_TICKS>;

// =============================================================================
// Axis Range
// =============================================================================

/// A visible axis range `[min, max]`, always strictly ordered.
///
/// The constructor and setter enforce `min < max`; a degenerate or
/// inverted update is rejected and the previous range survives, so the
/// mapping code never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f32,
    max: f32,
}

impl Range {
    /// Build a range. Falls back to `[0, 1]` if `min < max` does not hold,
    /// internal callers always pass valid bounds.
    pub fn new(min: f32, max: f32) -> Self {
        if min < max {
            Self { min, max }
        } else {
            Self { min: 0.0, max: 1.0 }
        }
    }

    pub const fn min(&self) -> f32 {
        self.min
    }

    pub const fn max(&self) -> f32 {
        self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Update the range. Returns `false` (and keeps the old bounds) unless
    /// `min < max` strictly.
    pub fn set(&mut self, min: f32, max: f32) -> bool {
        if min < max {
            self.min = min;
            self.max = max;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

// =============================================================================
// Axis Label Configuration
// =============================================================================

/// Whether axis labels use the fallback 3x5 font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TinyLabelMode {
    /// Tiny font when the content dimension is below the threshold.
    Auto,
    /// Always the tiny font.
    On,
    /// Never the tiny font.
    Off,
}

/// Axis tick-label settings shared by both plot widgets.
#[derive(Debug, Clone)]
pub struct AxisLabels {
    /// Draw numeric labels at axis ticks.
    pub show: bool,
    /// Native text size used when the tiny font is not active (1-4).
    pub size: u8,
    pub tiny_mode: TinyLabelMode,
    /// Integer scale of the tiny font (1 = 3x5 pixels per glyph).
    pub tiny_scale: u8,
    /// `Auto` mode switches to the tiny font below this content dimension.
    pub tiny_threshold: i16,
    /// More than 1: exactly this many evenly spaced ticks per axis.
    /// 0 or 1: tick positions derive from the grid spacing instead.
    pub max_ticks: u8,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            show: false,
            size: 1,
            tiny_mode: TinyLabelMode::Auto,
            tiny_scale: 1,
            tiny_threshold: TINY_LABEL_AUTO_THRESHOLD,
            max_ticks: 0,
        }
    }
}

impl AxisLabels {
    /// Resolve the tiny-font decision for one content dimension.
    pub fn use_tiny(&self, content_dim: i16) -> bool {
        match self.tiny_mode {
            TinyLabelMode::On => true,
            TinyLabelMode::Off => false,
            TinyLabelMode::Auto => content_dim < self.tiny_threshold,
        }
    }

    /// Rendered pixel width of `text` under the current settings.
    fn text_width(&self, text: &str, tiny: bool) -> i16 {
        if tiny {
            tiny_font::text_width(text, self.tiny_scale)
        } else {
            text.len() as i16 * CHAR_WIDTH * self.size.max(1) as i16
        }
    }

    /// Rendered pixel height of one label line.
    fn text_height(&self, tiny: bool) -> i16 {
        if tiny {
            tiny_font::text_height(self.tiny_scale)
        } else {
            CHAR_HEIGHT * self.size.max(1) as i16
        }
    }
}

// =============================================================================
// Content Rect
// =============================================================================

/// The pixel sub-rectangle a plot actually draws data into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRect {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl ContentRect {
    /// Inset the content rect from a widget's outer bounds, reserving
    /// space for tick labels when they are shown.
    pub fn inset(base: &AssetBase, labels: &AxisLabels) -> Self {
        let (left, bottom) = if labels.show {
            let size = labels.size.max(1) as i16;
            (6 * size + 4, 8 * size + 4)
        } else {
            (2, 2)
        };
        let (top, right) = (2, 2);
        Self {
            x: base.x() + left,
            y: base.y() + top,
            w: (base.width() - left - right).max(1),
            h: (base.height() - top - bottom).max(1),
        }
    }

    /// Map a data x value into a pixel column inside the content rect.
    ///
    /// Precondition: `range` is valid (enforced by [`Range`]).
    pub fn map_x(&self, range: &Range, fx: f32) -> i16 {
        let normalized = (fx - range.min()) / range.span();
        self.x + round(normalized * (self.w - 1) as f32)
    }

    /// Map a data y value into a pixel row. Inverted: larger data y is a
    /// smaller pixel row.
    pub fn map_y(&self, range: &Range, fy: f32) -> i16 {
        let normalized = (fy - range.min()) / range.span();
        self.y + self.h - 1 - round(normalized * (self.h - 1) as f32)
    }

    /// Data value at a horizontal tick offset (inverse of `map_x`).
    pub fn tick_value_x(&self, range: &Range, offset: i16) -> f32 {
        if self.w <= 1 {
            return range.min();
        }
        range.min() + range.span() * offset as f32 / (self.w - 1) as f32
    }

    /// Data value at a vertical tick offset measured from the top row.
    pub fn tick_value_y(&self, range: &Range, offset: i16) -> f32 {
        if self.h <= 1 {
            return range.max();
        }
        range.max() - range.span() * offset as f32 / (self.h - 1) as f32
    }
}

#[inline]
fn round(v: f32) -> i16 {
    micromath::F32(v).round().0 as i16
}

// =============================================================================
// Tick Generation
// =============================================================================

/// Tick pixel offsets along one content dimension.
///
/// With `max_ticks > 1` the ticks are spread evenly, first tick on the
/// first pixel and last tick on the last. Otherwise ticks fall back to
/// the grid spacing; a spacing of 0 or one not smaller than the dimension
/// degenerates to just the two edge ticks.
pub fn tick_offsets(dim: i16, max_ticks: u8, grid_spacing: u8) -> TickOffsets {
    let mut out = TickOffsets::new();
    if dim <= 0 {
        return out;
    }
    if max_ticks > 1 {
        let count = (max_ticks as usize).min(MAX_AXIS_TICKS);
        let step = (dim - 1) as f32 / (count - 1) as f32;
        for k in 0..count {
            out.push(round(k as f32 * step)).ok();
        }
        return out;
    }

    let spacing = grid_spacing as i16;
    if spacing == 0 || spacing >= dim {
        out.push(0).ok();
        if dim > 1 {
            out.push(dim - 1).ok();
        }
        return out;
    }
    let mut offset = 0;
    while offset < dim {
        if out.push(offset).is_err() {
            break;
        }
        offset += spacing;
    }
    out
}

// =============================================================================
// Label Formatting
// =============================================================================

/// Format a tick value: integers (within 0.001 of truncation) print with
/// no decimals, everything else with exactly one.
pub fn format_label(value: f32) -> LabelBuf {
    let mut buf = LabelBuf::new();
    let truncated = micromath::F32(value).trunc().0;
    if micromath::F32(value - truncated).abs().0 < 0.001 {
        write!(buf, "{}", truncated as i32).ok();
    } else {
        write!(buf, "{value:.1}").ok();
    }
    buf
}

// =============================================================================
// Shared Drawing Helpers
// =============================================================================

/// Draw the x=0 / y=0 axis lines that fall inside the ranges.
pub(crate) fn draw_axes(
    surface: &mut dyn DrawSurface,
    content: &ContentRect,
    x_range: &Range,
    y_range: &Range,
) {
    if y_range.contains(0.0) {
        let y0 = content.map_y(y_range, 0.0);
        surface.draw_hline(content.x, y0, content.w, true);
    }
    if x_range.contains(0.0) {
        let x0 = content.map_x(x_range, 0.0);
        surface.draw_vline(x0, content.y, content.h, true);
    }
}

/// Draw dotted gridlines at the interior tick positions.
///
/// Edge ticks (first/last pixel) are skipped so the gridlines never sit on
/// the content border. Every second pixel is lit, keeping the grid visually
/// lighter than the data trace.
pub(crate) fn draw_grid(
    surface: &mut dyn DrawSurface,
    content: &ContentRect,
    max_ticks: u8,
    grid_spacing: u8,
) {
    for &off in tick_offsets(content.w, max_ticks, grid_spacing).iter() {
        if off == 0 || off == content.w - 1 {
            continue;
        }
        let gx = content.x + off;
        let mut j = 0;
        while j < content.h {
            surface.draw_pixel(gx, content.y + j, true);
            j += 2;
        }
    }
    for &off in tick_offsets(content.h, max_ticks, grid_spacing).iter() {
        if off == 0 || off == content.h - 1 {
            continue;
        }
        let gy = content.y + off;
        let mut j = 0;
        while j < content.w {
            surface.draw_pixel(content.x + j, gy, true);
            j += 2;
        }
    }
}

/// Render one label, tiny or native.
fn emit_label(
    surface: &mut dyn DrawSurface,
    labels: &AxisLabels,
    tiny: bool,
    x: i16,
    y: i16,
    text: &str,
) {
    if tiny {
        tiny_font::draw_text(surface, x, y, text, labels.tiny_scale);
    } else {
        surface.set_text_size(labels.size.max(1));
        surface.set_text_color(true, false);
        surface.set_cursor(x, y);
        surface.print(text);
    }
}

/// Draw numeric tick labels on both axes with collision suppression.
///
/// X labels sit centered under their tick, just below the content rect.
/// Y labels sit left of the y axis when x=0 is in range, otherwise left
/// of the content rect; they clamp to the widget's outer left edge rather
/// than running off the asset.
pub(crate) fn draw_axis_labels(
    surface: &mut dyn DrawSurface,
    outer: &AssetBase,
    content: &ContentRect,
    x_range: &Range,
    y_range: &Range,
    labels: &AxisLabels,
    grid_spacing: u8,
) {
    // --- X axis ------------------------------------------------------------
    let tiny_x = labels.use_tiny(content.w);
    let label_y = content.y + content.h + 2;
    let mut last_right: Option<i16> = None;
    for &off in tick_offsets(content.w, labels.max_ticks, grid_spacing).iter() {
        let text = format_label(content.tick_value_x(x_range, off));
        let w = labels.text_width(&text, tiny_x);
        let lx = content.x + off - w / 2;
        if let Some(right) = last_right {
            // Needs a 2px gap to the previous label or it is suppressed.
            if lx < right + 2 {
                continue;
            }
        }
        emit_label(surface, labels, tiny_x, lx, label_y, &text);
        last_right = Some(lx + w);
    }

    // --- Y axis ------------------------------------------------------------
    let tiny_y = labels.use_tiny(content.h);
    let axis_x = if x_range.contains(0.0) {
        content.map_x(x_range, 0.0)
    } else {
        content.x
    };
    let label_h = labels.text_height(tiny_y);
    let mut last_bottom: Option<i16> = None;
    for &off in tick_offsets(content.h, labels.max_ticks, grid_spacing).iter() {
        let text = format_label(content.tick_value_y(y_range, off));
        let w = labels.text_width(&text, tiny_y);
        let mut lx = axis_x - w - 2;
        if lx < outer.x() {
            lx = outer.x();
        }
        let ly = content.y + off - label_h / 2;
        if let Some(bottom) = last_bottom {
            if ly < bottom + 2 {
                continue;
            }
        }
        emit_label(surface, labels, tiny_y, lx, ly, &text);
        last_bottom = Some(ly + label_h);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
