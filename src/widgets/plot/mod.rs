//! Plot widgets and their shared layout engine.
//!
//! [`FunctionPlot`] samples a pure `fn(f32) -> f32` across its x domain;
//! [`DataPlot`] renders a rolling buffer of measured samples. Both defer
//! the hard part to [`layout`]: insetting a content rectangle that leaves
//! room for axis tick labels, mapping data coordinates to pixels,
//! auto-ranging, tick generation and label collision avoidance. When the
//! content area is too small for the regular font, labels drop to the
//! [`tiny_font`] 3x5 glyph set.

pub mod layout;
pub mod tiny_font;

mod data_plot;
mod function_plot;

pub use data_plot::DataPlot;
pub use function_plot::FunctionPlot;
pub use layout::{AxisLabels, ContentRect, Range, TinyLabelMode};

/// How a data plot renders its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlotStyle {
    /// Connect consecutive in-range samples with line segments.
    Lines,
    /// Draw a plus-shaped marker at each sample.
    Points,
    /// Both lines and markers.
    LinesPoints,
}
