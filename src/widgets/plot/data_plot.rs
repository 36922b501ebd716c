//! Rolling-buffer sample plot.
//!
//! Stores up to `capacity` `(x, y)` samples; once full, adding a sample
//! drops the oldest (FIFO), which is exactly what a live sensor trace
//! wants. Auto-scaling recomputes the visible ranges from the stored data
//! on every draw; fixed ranges are set explicitly and samples outside them
//! are skipped, not clamped.
//!
//! # Line Continuity
//!
//! A segment is only drawn between two consecutive in-range samples whose
//! pixel positions are closer than the content extent on both axes. This
//! suppresses the spurious full-width line that would otherwise appear
//! when a rolling buffer wraps or when the trace re-enters the range.
//!
//! # Animation
//!
//! With animation enabled, draw call `n` renders the first `n` samples and
//! advances the counter, producing a left-to-right reveal that freezes
//! once the whole buffer is shown.

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::config::MAX_PLOT_POINTS;
use crate::surface::DrawSurface;
use crate::widgets::plot::layout::{self, AxisLabels, ContentRect, Range};
use crate::widgets::plot::PlotStyle;

/// One stored sample.
type Sample = (f32, f32);

pub struct DataPlot {
    base: AssetBase,
    points: heapless::Vec<Sample, MAX_PLOT_POINTS>,
    /// Logical capacity; `points` never grows past this.
    capacity: usize,
    x_range: Range,
    y_range: Range,
    auto_scale: bool,
    style: PlotStyle,
    show_axes: bool,
    show_grid: bool,
    grid_spacing: u8,
    labels: AxisLabels,
    animation_frame: usize,
}

impl DataPlot {
    /// New plot with a rolling buffer of `capacity` samples (clamped to
    /// `1..=MAX_PLOT_POINTS`). Ranges default to `[0, 100]` until data
    /// arrives; auto-scale is on.
    pub fn new(x: i16, y: i16, width: i16, height: i16, capacity: usize) -> Self {
        Self {
            base: AssetBase::new(x, y, width, height),
            points: heapless::Vec::new(),
            capacity: capacity.clamp(1, MAX_PLOT_POINTS),
            x_range: Range::new(0.0, 100.0),
            y_range: Range::new(0.0, 100.0),
            auto_scale: true,
            style: PlotStyle::Lines,
            show_axes: true,
            show_grid: false,
            grid_spacing: 10,
            labels: AxisLabels::default(),
            animation_frame: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Data Management
    // -------------------------------------------------------------------------

    /// Append a sample; drops the oldest one when the buffer is full.
    pub fn add_point(&mut self, x: f32, y: f32) {
        if self.points.len() >= self.capacity {
            self.points.remove(0);
        }
        // Cannot fail: capacity <= MAX_PLOT_POINTS and we just made room.
        self.points.push((x, y)).ok();
    }

    /// Replace all samples; input beyond the capacity is dropped.
    pub fn set_data(&mut self, data: &[Sample]) {
        self.points.clear();
        for &sample in data.iter().take(self.capacity) {
            self.points.push(sample).ok();
        }
    }

    pub fn clear_data(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sample at `index`, oldest first. `None` when out of bounds.
    pub fn point(&self, index: usize) -> Option<Sample> {
        self.points.get(index).copied()
    }

    // -------------------------------------------------------------------------
    // Ranges
    // -------------------------------------------------------------------------

    /// Fix the x range. Ignored unless `min < max`; success turns
    /// auto-scaling off.
    pub fn set_x_range(&mut self, min: f32, max: f32) {
        if self.x_range.set(min, max) {
            self.auto_scale = false;
        }
    }

    /// Fix the y range. Same contract as [`set_x_range`](Self::set_x_range).
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

    /// Recompute both ranges from the stored samples: per-axis min/max
    /// padded by 10% of the span. Near-constant data (span below 1e-4)
    /// substitutes a span of 1.0 centered on the data before padding, so
    /// the mapping never degenerates. No-op without data.
    pub fn calculate_ranges(&mut self) {
        let Some(&(first_x, first_y)) = self.points.first() else {
            return;
        };
        let (mut min_x, mut max_x) = (first_x, first_x);
        let (mut min_y, mut max_y) = (first_y, first_y);
        for &(px, py) in self.points.iter().skip(1) {
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }
        let (min_x, max_x) = padded(min_x, max_x);
        let (min_y, max_y) = padded(min_y, max_y);
        self.x_range.set(min_x, max_x);
        self.y_range.set(min_y, max_y);
    }

    // -------------------------------------------------------------------------
    // Display Options
    // -------------------------------------------------------------------------

    pub fn set_style(&mut self, style: PlotStyle) {
        self.style = style;
    }

    pub fn style(&self) -> PlotStyle {
        self.style
    }

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

    pub fn grid_spacing(&self) -> u8 {
        self.grid_spacing
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.labels.show = show;
    }

    /// Full access to the tick-label settings (font size, tiny mode,
    /// tick count).
    pub fn labels_mut(&mut self) -> &mut AxisLabels {
        &mut self.labels
    }

    // -------------------------------------------------------------------------
    // Animation
    // -------------------------------------------------------------------------

    pub fn reset_animation(&mut self) {
        self.animation_frame = 0;
    }

    pub fn advance_animation(&mut self) {
        if self.animation_frame < self.points.len() {
            self.animation_frame += 1;
        }
    }

    pub fn animation_frame(&self) -> usize {
        self.animation_frame
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Plus-shaped point marker, clipped at the canvas edges.
    fn draw_marker(surface: &mut dyn DrawSurface, x: i16, y: i16) {
        surface.draw_pixel(x, y, true);
        if x > 0 {
            surface.draw_pixel(x - 1, y, true);
        }
        if x < surface.width() - 1 {
            surface.draw_pixel(x + 1, y, true);
        }
        if y > 0 {
            surface.draw_pixel(x, y - 1, true);
        }
        if y < surface.height() - 1 {
            surface.draw_pixel(x, y + 1, true);
        }
    }

    fn in_range(&self, sample: Sample) -> bool {
        self.x_range.contains(sample.0) && self.y_range.contains(sample.1)
    }
}

impl Asset for DataPlot {
    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn kind(&self) -> AssetKind {
        AssetKind::DataPlot
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        if !self.base.is_visible() || self.points.is_empty() {
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
            self.calculate_ranges();
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

        // Animation caps how many samples render this frame.
        let mut limit = self.points.len();
        if self.base.is_animated() && self.animation_frame < self.points.len() {
            limit = self.animation_frame;
            self.animation_frame += 1;
        }

        let draw_lines = matches!(self.style, PlotStyle::Lines | PlotStyle::LinesPoints);
        let draw_points = matches!(self.style, PlotStyle::Points | PlotStyle::LinesPoints);

        for i in 0..limit {
            let sample = self.points[i];
            if !self.in_range(sample) {
                continue;
            }
            let sx = content.map_x(&self.x_range, sample.0);
            let sy = content.map_y(&self.y_range, sample.1);

            if draw_lines && i > 0 {
                let prev = self.points[i - 1];
                if self.in_range(prev) {
                    let px = content.map_x(&self.x_range, prev.0);
                    let py = content.map_y(&self.y_range, prev.1);
                    // Suppress the jump across a rolling-buffer discontinuity.
                    if (sx - px).abs() < content.w && (sy - py).abs() < content.h {
                        surface.draw_line(px, py, sx, sy, true);
                    }
                }
            }

            if draw_points {
                Self::draw_marker(surface, sx, sy);
            }
        }
    }
}

/// Pad `[min, max]` by 10% of its span; a near-zero span first widens to
/// 1.0 around the data.
fn padded(min: f32, max: f32) -> (f32, f32) {
    let (min, max) = if max - min < 1e-4 {
        let center = (min + max) * 0.5;
        (center - 0.5, center + 0.5)
    } else {
        (min, max)
    };
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_surface::RecordingSurface;

    fn plot_64x32_content() -> DataPlot {
        // Labels off => 2px inset all around, so 68x36 outer gives a
        // 64x32 content rect.
        DataPlot::new(0, 0, 68, 36, 3)
    }

    // -------------------------------------------------------------------------
    // Rolling Buffer Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_point_rolls_past_capacity() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 3);
        plot.add_point(1.0, 10.0);
        plot.add_point(2.0, 20.0);
        plot.add_point(3.0, 30.0);
        plot.add_point(4.0, 40.0);

        assert_eq!(plot.len(), 3, "length stays at capacity");
        assert_eq!(
            plot.point(0),
            Some((2.0, 20.0)),
            "oldest point dropped, second insert is now first"
        );
        assert_eq!(plot.point(2), Some((4.0, 40.0)));
    }

    #[test]
    fn test_point_out_of_bounds_is_none() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 8);
        plot.add_point(1.0, 1.0);
        assert_eq!(plot.point(1), None);
    }

    #[test]
    fn test_set_data_truncates_to_capacity() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 2);
        plot.set_data(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(plot.len(), 2);
        assert_eq!(plot.point(0), Some((1.0, 1.0)));
    }

    #[test]
    fn test_capacity_is_clamped() {
        let plot = DataPlot::new(0, 0, 64, 32, 100_000);
        assert_eq!(plot.capacity(), MAX_PLOT_POINTS);
        let plot = DataPlot::new(0, 0, 64, 32, 0);
        assert_eq!(plot.capacity(), 1, "zero capacity clamps to one sample");
    }

    // -------------------------------------------------------------------------
    // Range Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_invalid_range_keeps_state_and_auto_scale() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 8);
        assert!(plot.auto_scale());
        plot.set_x_range(5.0, 5.0);
        assert_eq!(plot.x_range(), (0.0, 100.0), "range unchanged");
        assert!(plot.auto_scale(), "failed set must not touch auto-scale");
    }

    #[test]
    fn test_valid_range_disables_auto_scale() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 8);
        plot.set_y_range(-1.0, 1.0);
        assert_eq!(plot.y_range(), (-1.0, 1.0));
        assert!(!plot.auto_scale());
    }

    #[test]
    fn test_calculate_ranges_pads_ten_percent() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 8);
        plot.set_data(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        plot.calculate_ranges();
        let (min_x, max_x) = plot.x_range();
        assert!((min_x - -0.2).abs() < 1e-5, "10% pad of span 2, got {min_x}");
        assert!((max_x - 2.2).abs() < 1e-5, "got {max_x}");
    }

    #[test]
    fn test_calculate_ranges_constant_data_widens() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 8);
        plot.set_data(&[(3.0, 3.0), (3.0, 3.0)]);
        plot.calculate_ranges();
        let (min_x, max_x) = plot.x_range();
        let (min_y, max_y) = plot.y_range();
        assert!(max_x - min_x >= 1.0, "x span widens to at least 1.0");
        assert!(max_y - min_y >= 1.0, "y span widens to at least 1.0");
        assert!(min_x < 3.0 && 3.0 < max_x, "range still brackets the data");
        assert!(min_y < 3.0 && 3.0 < max_y);
    }

    // -------------------------------------------------------------------------
    // Rendering Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_lines_render_two_segments_no_markers() {
        let mut plot = plot_64x32_content();
        plot.add_point(0.0, 0.0);
        plot.add_point(1.0, 1.0);
        plot.add_point(2.0, 2.0);
        plot.calculate_ranges();

        let mut s = RecordingSurface::new(128, 64);
        plot.draw(&mut s);

        assert!(
            s.line_count() >= 2,
            "segments 0->1 and 1->2 expected, got {}",
            s.line_count()
        );
        assert_eq!(s.pixel_count(true), 0, "LINES style draws no point markers");
    }

    #[test]
    fn test_out_of_range_sample_breaks_the_line() {
        let mut plot = plot_64x32_content();
        plot.set_x_range(0.0, 10.0);
        plot.set_y_range(0.0, 10.0);
        plot.set_data(&[(5.0, 5.0), (50.0, 50.0), (6.0, 6.0)]);

        let mut s = RecordingSurface::new(128, 64);
        plot.draw(&mut s);
        assert_eq!(
            s.line_count(),
            0,
            "no segment may bridge across a skipped out-of-range sample"
        );
    }

    #[test]
    fn test_points_style_draws_plus_markers() {
        let mut plot = plot_64x32_content();
        plot.set_style(PlotStyle::Points);
        plot.set_show_axes(false);
        plot.set_data(&[(0.0, 0.0), (2.0, 2.0)]);
        plot.calculate_ranges();

        let mut s = RecordingSurface::new(128, 64);
        plot.draw(&mut s);
        assert_eq!(s.pixel_count(true), 10, "two markers, 5 pixels each");
        assert_eq!(s.line_count(), 0);
    }

    #[test]
    fn test_invisible_or_empty_plot_draws_nothing() {
        let mut s = RecordingSurface::new(128, 64);

        let mut empty = plot_64x32_content();
        empty.base_mut().set_border(true);
        empty.draw(&mut s);
        assert!(s.calls().is_empty(), "no data, not even the border draws");

        let mut hidden = plot_64x32_content();
        hidden.add_point(1.0, 1.0);
        hidden.base_mut().hide();
        hidden.draw(&mut s);
        assert!(s.calls().is_empty());
    }

    // -------------------------------------------------------------------------
    // Animation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_animation_reveals_then_freezes() {
        let mut plot = plot_64x32_content();
        plot.base_mut().set_animate(true);
        plot.set_show_axes(false);
        plot.set_data(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        plot.calculate_ranges();

        let mut s = RecordingSurface::new(128, 64);
        plot.draw(&mut s); // renders 0 samples, advances to 1
        assert_eq!(s.line_count(), 0);
        assert_eq!(plot.animation_frame(), 1);

        for _ in 0..4 {
            plot.draw(&mut s);
        }
        assert_eq!(plot.animation_frame(), 3, "counter freezes at sample count");

        s.clear();
        plot.draw(&mut s);
        assert_eq!(s.line_count(), 2, "fully revealed plot draws every segment");
    }
}
