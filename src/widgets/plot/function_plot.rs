//! Curve plot for a `y = f(x)` function.
//!
//! The function is sampled once per content-rect pixel column, so the
//! rendering cost is bounded by the widget width rather than by any
//! notion of data density. Non-finite samples (NaN, infinities from
//! poles) are skipped and break the curve instead of corrupting it.
//!
//! The x range is always caller-controlled; the y range can opt in to
//! auto-scaling, which pre-samples the function across the x range.

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::surface::DrawSurface;
use crate::widgets::plot::layout::{self, AxisLabels, ContentRect, Range};

/// Plotted function. Plain `fn` pointer, so widgets stay `'static` and
/// trivially movable into a scene.
pub type PlotFn = fn(f32) -> f32;

pub struct FunctionPlot {
    base: AssetBase,
    function: PlotFn,
    x_range: Range,
    y_range: Range,
    auto_scale: bool,
    show_axes: bool,
    show_grid: bool,
    grid_spacing: u8,
    labels: AxisLabels,
    animation_col: i16,
}

impl FunctionPlot {
    /// New plot of `function` over the default x range `[-10, 10]`. The
    /// y range starts fixed at `[-10, 10]`; auto-fitting it is opt-in via
    /// [`set_auto_scale`](Self::set_auto_scale).
    pub fn new(x: i16, y: i16, width: i16, height: i16, function: PlotFn) -> Self {
        Self {
            base: AssetBase::new(x, y, width, height),
            function,
            x_range: Range::new(-10.0, 10.0),
            y_range: Range::new(-10.0, 10.0),
            auto_scale: false,
            show_axes: true,
            show_grid: false,
            grid_spacing: 10,
            labels: AxisLabels::default(),
            animation_col: 0,
        }
    }

    pub fn set_function(&mut self, function: PlotFn) {
        self.function = function;
        self.animation_col = 0;
    }

    // -------------------------------------------------------------------------
    // Ranges
    // -------------------------------------------------------------------------

    /// Set the sampled x interval. Ignored unless `min < max`. Does not
    /// affect y auto-scaling, which re-evaluates over the new interval.
    pub fn set_x_range(&mut self, min: f32, max: f32) {
        self.x_range.set(min, max);
    }

    /// Fix the y range. Ignored unless `min < max`; success turns y
    /// auto-scaling off.
    pub fn set_y_range(&mut self, min: f32, max: f32) {
        if self.y_range.set(min, max) {
            self.auto_scale = false;
        }
    }

    pub fn x_range(&self) -> (f32, f32) {
        (self.x_range.min(), self.x_range.max())
    }

    pub fn y_range(&self) -> (f32, f32) {
        (self.y_range.min(), self.y_range.max())
    }

    pub fn set_auto_scale(&mut self, auto_scale: bool) {
        self.auto_scale = auto_scale;
    }

    pub fn auto_scale(&self) -> bool {
        self.auto_scale
    }

    /// Sample the function across the x range and fit the y range to the
    /// finite results, padded by 10%. Near-constant functions widen to a
    /// span of 1.0 first. Leaves the y range alone when every sample is
    /// non-finite.
    pub fn calculate_y_range(&mut self) {
        let samples = 2 * self.base.width().max(1) as i32;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for i in 0..=samples {
            let fx = self.x_range.min() + self.x_range.span() * (i as f32 / samples as f32);
            let fy = (self.function)(fx);
            if fy.is_finite() {
                min_y = min_y.min(fy);
                max_y = max_y.max(fy);
            }
        }
        if min_y > max_y {
            return;
        }
        let (min_y, max_y) = if max_y - min_y < 1e-4 {
            let center = (min_y + max_y) * 0.5;
            (center - 0.5, center + 0.5)
        } else {
            (min_y, max_y)
        };
        let pad = (max_y - min_y) * 0.1;
        self.y_range.set(min_y - pad, max_y + pad);
    }

    // -------------------------------------------------------------------------
    // Display Options
    // -------------------------------------------------------------------------

    pub fn set_show_axes(&mut self, show: bool) {
        self.show_axes = show;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Grid spacing in pixels; zero is rejected.
    pub fn set_grid_spacing(&mut self, spacing: u8) {
        if spacing > 0 {
            self.grid_spacing = spacing;
        }
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.labels.show = show;
    }

    pub fn labels_mut(&mut self) -> &mut AxisLabels {
        &mut self.labels
    }

    pub fn reset_animation(&mut self) {
        self.animation_col = 0;
    }
}

impl Asset for FunctionPlot {
    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn kind(&self) -> AssetKind {
        AssetKind::FunctionPlot
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        if !self.base.is_visible() {
            return;
        }

        if self.base.has_border() {
            surface.draw_rect(
                self.base.x(),
                self.base.y(),
                self.base.width(),
                self.base.height(),
                true,
            );
        }

        if self.auto_scale {
            self.calculate_y_range();
        }

        let content = ContentRect::inset(&self.base, &self.labels);

        if self.show_grid {
            layout::draw_grid(surface, &content, self.labels.max_ticks, self.grid_spacing);
        }
        if self.show_axes {
            layout::draw_axes(surface, &content, &self.x_range, &self.y_range);
        }
        if self.labels.show {
            layout::draw_axis_labels(
                surface,
                &self.base,
                &content,
                &self.x_range,
                &self.y_range,
                &self.labels,
                self.grid_spacing,
            );
        }

        // Left-to-right reveal, one extra column per frame.
        let mut limit = content.w;
        if self.base.is_animated() && self.animation_col < content.w {
            limit = self.animation_col;
            self.animation_col += 1;
        }

        let mut prev: Option<(i16, i16)> = None;
        for col in 0..limit {
            let fx = self.x_range.min()
                + self.x_range.span() * (col as f32 / (content.w - 1).max(1) as f32);
            let fy = (self.function)(fx);
            if !fy.is_finite() || !self.y_range.contains(fy) {
                prev = None;
                continue;
            }
            let sx = content.x + col;
            let sy = content.map_y(&self.y_range, fy);
            match prev {
                // A jump taller than the content rect means a discontinuity,
                // draw the sample as an isolated pixel instead of a wall.
                Some((px, py)) if (sy - py).abs() < content.h => {
                    surface.draw_line(px, py, sx, sy, true);
                }
                _ => surface.draw_pixel(sx, sy, true),
            }
            prev = Some((sx, sy));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
