//! Primitive shape widget.
//!
//! Each shape stores its own geometry (corner, center, vertices) and the
//! shared [`AssetBase`] is kept in sync as the shape's true bounding box,
//! so hit-testing with [`AssetBase::contains`] agrees with what is drawn.
//! A circle at center `(cx, cy)` with radius `r` therefore has its base
//! at `(cx - r, cy - r)` spanning `2r + 1` pixels, not at the center.
//!
//! Reposition shapes with [`Geometry::translate`] or the `set_as_*`
//! setters; writing the base position directly would detach it from the
//! stored geometry.

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::surface::DrawSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Circle,
    Line,
    Triangle,
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Rectangle { x: i16, y: i16, w: i16, h: i16 },
    RoundedRectangle { x: i16, y: i16, w: i16, h: i16, r: i16 },
    Circle { cx: i16, cy: i16, r: i16 },
    Line { x0: i16, y0: i16, x1: i16, y1: i16 },
    Triangle { x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16 },
}

impl Shape {
    /// Pixel-inclusive bounding box `(x, y, w, h)`.
    fn bounds(&self) -> (i16, i16, i16, i16) {
        match *self {
            Shape::Rectangle { x, y, w, h } | Shape::RoundedRectangle { x, y, w, h, .. } => {
                (x, y, w, h)
            }
            Shape::Circle { cx, cy, r } => (cx - r, cy - r, 2 * r + 1, 2 * r + 1),
            Shape::Line { x0, y0, x1, y1 } => (
                x0.min(x1),
                y0.min(y1),
                (x1 - x0).abs() + 1,
                (y1 - y0).abs() + 1,
            ),
            Shape::Triangle { x0, y0, x1, y1, x2, y2 } => {
                let min_x = x0.min(x1).min(x2);
                let min_y = y0.min(y1).min(y2);
                let max_x = x0.max(x1).max(x2);
                let max_y = y0.max(y1).max(y2);
                (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
            }
        }
    }

    fn translate(&mut self, dx: i16, dy: i16) {
        match self {
            Shape::Rectangle { x, y, .. } | Shape::RoundedRectangle { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Shape::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Line { x0, y0, x1, y1 } => {
                *x0 += dx;
                *y0 += dy;
                *x1 += dx;
                *y1 += dy;
            }
            Shape::Triangle { x0, y0, x1, y1, x2, y2 } => {
                *x0 += dx;
                *y0 += dy;
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
        }
    }
}

pub struct Geometry {
    base: AssetBase,
    shape: Shape,
    filled: bool,
}

impl Geometry {
    fn from_shape(shape: Shape, filled: bool) -> Self {
        let (x, y, w, h) = shape.bounds();
        Self {
            base: AssetBase::new(x, y, w, h),
            shape,
            filled,
        }
    }

    pub fn rectangle(x: i16, y: i16, w: i16, h: i16, filled: bool) -> Self {
        Self::from_shape(Shape::Rectangle { x, y, w, h }, filled)
    }

    pub fn rounded_rectangle(x: i16, y: i16, w: i16, h: i16, r: i16, filled: bool) -> Self {
        Self::from_shape(Shape::RoundedRectangle { x, y, w, h, r }, filled)
    }

    pub fn circle(cx: i16, cy: i16, r: i16, filled: bool) -> Self {
        Self::from_shape(Shape::Circle { cx, cy, r }, filled)
    }

    pub fn line(x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        Self::from_shape(Shape::Line { x0, y0, x1, y1 }, false)
    }

    pub fn triangle(x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, filled: bool) -> Self {
        Self::from_shape(Shape::Triangle { x0, y0, x1, y1, x2, y2 }, filled)
    }

    // -------------------------------------------------------------------------
    // Shape Management
    // -------------------------------------------------------------------------

    fn replace(&mut self, shape: Shape, filled: bool) {
        self.shape = shape;
        self.filled = filled;
        self.sync_base();
    }

    /// Refresh the base bounding box from the stored geometry.
    fn sync_base(&mut self) {
        let (x, y, w, h) = self.shape.bounds();
        self.base.set_position(x, y);
        self.base.set_size(w, h);
    }

    pub fn set_as_rectangle(&mut self, x: i16, y: i16, w: i16, h: i16, filled: bool) {
        self.replace(Shape::Rectangle { x, y, w, h }, filled);
    }

    pub fn set_as_rounded_rectangle(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, filled: bool) {
        self.replace(Shape::RoundedRectangle { x, y, w, h, r }, filled);
    }

    pub fn set_as_circle(&mut self, cx: i16, cy: i16, r: i16, filled: bool) {
        self.replace(Shape::Circle { cx, cy, r }, filled);
    }

    pub fn set_as_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        self.replace(Shape::Line { x0, y0, x1, y1 }, false);
    }

    pub fn set_as_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, filled: bool) {
        self.replace(Shape::Triangle { x0, y0, x1, y1, x2, y2 }, filled);
    }

    /// Move the shape and its bounding box together.
    pub fn translate(&mut self, dx: i16, dy: i16) {
        self.shape.translate(dx, dy);
        self.sync_base();
    }

    pub fn shape_kind(&self) -> ShapeKind {
        match self.shape {
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::RoundedRectangle { .. } => ShapeKind::RoundedRectangle,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Triangle { .. } => ShapeKind::Triangle,
        }
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn radius(&self) -> Option<i16> {
        match self.shape {
            Shape::Circle { r, .. } | Shape::RoundedRectangle { r, .. } => Some(r),
            _ => None,
        }
    }

    pub fn line_points(&self) -> Option<(i16, i16, i16, i16)> {
        match self.shape {
            Shape::Line { x0, y0, x1, y1 } => Some((x0, y0, x1, y1)),
            _ => None,
        }
    }

    pub fn triangle_points(&self) -> Option<(i16, i16, i16, i16, i16, i16)> {
        match self.shape {
            Shape::Triangle { x0, y0, x1, y1, x2, y2 } => Some((x0, y0, x1, y1, x2, y2)),
            _ => None,
        }
    }
}

impl Asset for Geometry {
    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Geometry
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        if !self.base.is_visible() {
            return;
        }

        match self.shape {
            Shape::Rectangle { x, y, w, h } => {
                if self.filled {
                    surface.fill_rect(x, y, w, h, true);
                } else {
                    surface.draw_rect(x, y, w, h, true);
                }
            }
            Shape::RoundedRectangle { x, y, w, h, r } => {
                if self.filled {
                    surface.fill_round_rect(x, y, w, h, r, true);
                } else {
                    surface.draw_round_rect(x, y, w, h, r, true);
                }
            }
            Shape::Circle { cx, cy, r } => {
                if self.filled {
                    surface.fill_circle(cx, cy, r, true);
                } else {
                    surface.draw_circle(cx, cy, r, true);
                }
            }
            Shape::Line { x0, y0, x1, y1 } => {
                surface.draw_line(x0, y0, x1, y1, true);
            }
            Shape::Triangle { x0, y0, x1, y1, x2, y2 } => {
                if self.filled {
                    surface.fill_triangle(x0, y0, x1, y1, x2, y2, true);
                } else {
                    surface.draw_triangle(x0, y0, x1, y1, x2, y2, true);
                }
            }
        }

        // Border ring one pixel outside the shape. Lines and triangles
        // have no meaningful outset ring.
        if self.base.has_border() {
            match self.shape {
                Shape::Rectangle { x, y, w, h } | Shape::RoundedRectangle { x, y, w, h, .. } => {
                    surface.draw_rect(x - 1, y - 1, w + 2, h + 2, true);
                }
                Shape::Circle { cx, cy, r } => {
                    surface.draw_circle(cx, cy, r + 1, true);
                }
                Shape::Line { .. } | Shape::Triangle { .. } => {}
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
