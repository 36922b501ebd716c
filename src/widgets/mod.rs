//! Drawable widgets for the OLED scene graph.
//!
//! Every widget embeds an [`AssetBase`](crate::asset::AssetBase) and
//! implements [`Asset`](crate::asset::Asset):
//!
//! - [`text_box`]: Word-wrapped, aligned text with typewriter animation
//! - [`plot`]: Function and data plots sharing one layout engine
//! - [`table`]: Auto-fit row/column grid with cell truncation
//! - [`geometry`]: Primitive shapes (rect, circle, line, triangle)
//! - [`bitmap`]: 1bpp raster blits and generated test patterns
//!
//! Widgets draw bottom-up against the [`DrawSurface`](crate::surface)
//! contract only; none of them knows about the display driver or about
//! each other. Layering is the scene's job.

pub mod bitmap;
pub mod geometry;
pub mod plot;
pub mod table;
pub mod text_box;

pub use bitmap::Bitmap;
pub use geometry::{Geometry, ShapeKind};
pub use plot::{DataPlot, FunctionPlot, PlotStyle, TinyLabelMode};
pub use table::Table;
pub use text_box::{TextAlign, TextBox};
