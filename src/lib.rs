//! Scene-graph widget compositor for a 128x64 monochrome OLED.
//!
//! This library is the display layer of a small greenhouse monitor: sensor
//! tasks push readings into widgets, a polling loop calls
//! [`Scene::draw_all`](scene::Scene::draw_all) once per frame, and the caller
//! flushes the underlying framebuffer to the panel. The hardware transport
//! (I2C, SSD1306 init, sensor drivers) lives outside this crate; the only
//! boundary is the [`DrawSurface`](surface::DrawSurface) trait, which any
//! `embedded-graphics` draw target satisfies through the
//! [`Canvas`](surface::Canvas) adapter.
//!
//! # Modules
//!
//! - [`config`]: Layout and capacity constants
//! - [`surface`]: The `DrawSurface` contract and the `embedded-graphics` adapter
//! - [`asset`]: Shared widget state (position, size, z-index, animation)
//! - [`widgets`]: Text box, plots, table, geometry and bitmap widgets
//! - [`scene`]: Z-ordered widget arena and draw scheduler
//!
//! # no_std Compatibility
//!
//! The library is `no_std` on targets; tests build with `std` so the host
//! test harness works. No heap allocation anywhere; all storage is
//! `heapless` with capacities from [`config`].

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod asset;
pub mod config;
pub mod scene;
pub mod surface;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_surface;

// Re-export the items a typical caller touches every frame.
pub use asset::{Asset, AssetBase, AssetKind};
pub use scene::{AssetId, Scene, Widget};
pub use surface::{Canvas, DrawSurface};
pub use widgets::bitmap::Bitmap;
pub use widgets::geometry::{Geometry, ShapeKind};
pub use widgets::plot::{DataPlot, FunctionPlot, PlotStyle, TinyLabelMode};
pub use widgets::table::Table;
pub use widgets::text_box::{TextAlign, TextBox};
