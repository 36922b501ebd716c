//! Shared widget state and the polymorphic draw contract.
//!
//! Every widget embeds an [`AssetBase`] (position, size, visibility,
//! border, animation and z-index) and implements [`Asset`]. The variant
//! tag [`AssetKind`] identifies the concrete widget without any runtime
//! type machinery, the same trick the scene's closed `Widget` union uses.
//!
//! # Total Setters
//!
//! Setters never fail and never panic. Negative sizes are clamped to 0;
//! negative positions are legal (a widget may hang partially off-canvas,
//! drawing clips). `draw` on an invisible widget is a silent no-op.

use crate::surface::DrawSurface;

/// Identifies the concrete widget behind an [`Asset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetKind {
    TextBox,
    FunctionPlot,
    DataPlot,
    Table,
    Geometry,
    Bitmap,
}

/// Position, size, visibility, border, animation and layering state shared
/// by every widget.
#[derive(Debug, Clone)]
pub struct AssetBase {
    x: i16,
    y: i16,
    width: i16,
    height: i16,
    visible: bool,
    border: bool,
    animate: bool,
    z_index: i16,
}

impl AssetBase {
    /// New base at `(x, y)` with the given extent. Negative dimensions are
    /// clamped to 0.
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            x,
            y,
            width: if width > 0 { width } else { 0 },
            height: if height > 0 { height } else { 0 },
            visible: true,
            border: false,
            animate: false,
            z_index: 0,
        }
    }

    pub const fn x(&self) -> i16 {
        self.x
    }

    pub const fn y(&self) -> i16 {
        self.y
    }

    pub const fn width(&self) -> i16 {
        self.width
    }

    pub const fn height(&self) -> i16 {
        self.height
    }

    pub fn set_x(&mut self, x: i16) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i16) {
        self.y = y;
    }

    pub fn set_position(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    pub fn set_width(&mut self, width: i16) {
        self.width = width.max(0);
    }

    pub fn set_height(&mut self, height: i16) {
        self.height = height.max(0);
    }

    pub fn set_size(&mut self, width: i16, height: i16) {
        self.set_width(width);
        self.set_height(height);
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub const fn has_border(&self) -> bool {
        self.border
    }

    pub fn set_border(&mut self, border: bool) {
        self.border = border;
    }

    pub const fn is_animated(&self) -> bool {
        self.animate
    }

    pub fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
    }

    pub const fn z_index(&self) -> i16 {
        self.z_index
    }

    /// Higher z-index draws later, i.e. on top.
    pub fn set_z_index(&mut self, z_index: i16) {
        self.z_index = z_index;
    }

    /// Half-open containment test: `x <= px < x + width`,
    /// `y <= py < y + height`. A zero-sized base contains nothing.
    pub const fn contains(&self, px: i16, py: i16) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// The polymorphic widget contract.
///
/// `draw` takes `&mut self` because animated widgets advance their
/// animation counter as a side effect of drawing. Implementations must
/// check their own `visible` flag and emit nothing when hidden.
pub trait Asset {
    fn base(&self) -> &AssetBase;

    fn base_mut(&mut self) -> &mut AssetBase;

    fn kind(&self) -> AssetKind;

    fn draw(&mut self, surface: &mut dyn DrawSurface);
}

// =============================================================================
// Unit Tests
// =============================================================================
