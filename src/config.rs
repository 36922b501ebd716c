//! Layout and capacity constants.
//!
//! Everything here is a compile-time constant so no layout arithmetic or
//! capacity decision happens per frame. Storage capacities bound the
//! `heapless` containers used by the widgets. There is no heap, so these
//! are hard ceilings, not hints.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1306 128x64 module).
pub const SCREEN_WIDTH: i16 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: i16 = 64;

// =============================================================================
// Text Metrics
// =============================================================================

/// Layout width of one character cell at text size 1.
///
/// The classic 5x7 OLED font occupies a 6x8 cell; all width/truncation
/// math in the widgets scales this by the text size. The actual glyphs
/// rendered by [`Canvas`](crate::surface::Canvas) are close to but not
/// exactly this cell, which is fine; layout only needs a stable budget.
pub const CHAR_WIDTH: i16 = 6;

/// Layout height of one character cell at text size 1.
pub const CHAR_HEIGHT: i16 = 8;

// =============================================================================
// Scene Capacity
// =============================================================================

/// Maximum number of widgets a [`Scene`](crate::scene::Scene) can hold.
pub const MAX_SCENE_ASSETS: usize = 20;

// =============================================================================
// Widget Storage Capacities
// =============================================================================

/// Maximum samples a data plot can store. A plot's logical capacity is set
/// at construction and may be smaller; it is clamped to this ceiling.
pub const MAX_PLOT_POINTS: usize = 128;

/// Maximum ticks generated along one plot axis.
pub const MAX_AXIS_TICKS: usize = 16;

/// Maximum characters in a text box (typewriter animation counts these).
pub const MAX_TEXT_CHARS: usize = 128;

/// Maximum total cells in a table (`rows * cols`).
pub const MAX_TABLE_CELLS: usize = 32;

/// Maximum table columns.
pub const MAX_TABLE_COLS: usize = 8;

/// Maximum characters stored per table cell. At size-1 text a 128px row
/// fits 21 characters, so 24 leaves headroom without wasting RAM.
pub const MAX_CELL_CHARS: usize = 24;

/// Maximum bytes of owned bitmap data: a full 128x64 1bpp frame.
pub const MAX_BITMAP_BYTES: usize = 1024;

// =============================================================================
// Plot Label Configuration
// =============================================================================

/// Content dimension (pixels) below which axis labels automatically fall
/// back to the tiny 3x5 font when the tiny-label mode is `Auto`.
pub const TINY_LABEL_AUTO_THRESHOLD: i16 = 36;
