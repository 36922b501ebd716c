//! The drawing-surface contract and its `embedded-graphics` adapter.
//!
//! Widgets never talk to a display driver directly. They emit primitives
//! against [`DrawSurface`], a monochrome canvas with signed 16-bit
//! coordinates and a boolean "on" color. The production implementation is
//! [`Canvas`], which forwards every primitive to an
//! `embedded_graphics::DrawTarget<Color = BinaryColor>`: an `ssd1306`
//! framebuffer on hardware, a `SimulatorDisplay` on the desktop.
//!
//! # Cursor-Based Text
//!
//! Text follows the classic OLED model: `set_cursor` / `set_text_size` /
//! `set_text_color` configure a small state machine, `print` renders at the
//! cursor and advances it. Layout math elsewhere budgets
//! [`CHAR_WIDTH`](crate::config::CHAR_WIDTH) x
//! [`CHAR_HEIGHT`](crate::config::CHAR_HEIGHT) cells per character and
//! scales by the text size.
//!
//! # Clipping
//!
//! Out-of-bounds drawing is legal and silently clipped; widgets may be
//! positioned partially off-canvas. `embedded-graphics` targets already
//! guarantee this, so [`Canvas`] adds no bounds checks of its own.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::text::{Baseline, Text};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

/// Monochrome drawing surface consumed by every widget.
///
/// All shape methods take a boolean color: `true` lights the pixel. The
/// `draw_bitmap` and numeric-print methods are provided, built on the
/// required primitives, so implementations only supply the primitive set.
pub trait DrawSurface {
    /// Canvas width in pixels.
    fn width(&self) -> i16;

    /// Canvas height in pixels.
    fn height(&self) -> i16;

    fn draw_pixel(&mut self, x: i16, y: i16, on: bool);

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, on: bool);

    /// Horizontal line from `(x, y)`, `len` pixels to the right.
    fn draw_hline(&mut self, x: i16, y: i16, len: i16, on: bool);

    /// Vertical line from `(x, y)`, `len` pixels down.
    fn draw_vline(&mut self, x: i16, y: i16, len: i16, on: bool);

    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool);

    fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool);

    fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, on: bool);

    fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, on: bool);

    /// Circle outline centered at `(cx, cy)` with radius `r` (span `2r+1`).
    fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool);

    fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool);

    #[allow(clippy::too_many_arguments)]
    fn draw_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool);

    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool);

    /// Move the text cursor to `(x, y)` (top-left of the next glyph).
    fn set_cursor(&mut self, x: i16, y: i16);

    /// Text scale factor, 1-4. Values outside that range are clamped.
    fn set_text_size(&mut self, size: u8);

    /// Foreground on/off plus whether glyph backgrounds are painted opaque.
    fn set_text_color(&mut self, on: bool, opaque_bg: bool);

    /// Render `text` at the cursor and advance the cursor past it.
    fn print(&mut self, text: &str);

    /// Print an integer at the cursor.
    fn print_i32(&mut self, value: i32) {
        let mut buf: heapless::String<12> = heapless::String::new();
        // 12 bytes fit any i32; formatting cannot fail
        write!(buf, "{value}").ok();
        self.print(&buf);
    }

    /// Print a float at the cursor with the given number of decimals.
    fn print_f32(&mut self, value: f32, decimals: u8) {
        let mut buf: heapless::String<24> = heapless::String::new();
        write!(buf, "{value:.*}", decimals as usize).ok();
        self.print(&buf);
    }

    /// Blit packed 1-bit-per-pixel raster data at `(x, y)`.
    ///
    /// Layout is row-major, MSB-first, each row padded to a whole byte
    /// (the Adafruit GFX bitmap format). Set bits are drawn in `on`;
    /// clear bits are transparent. Truncated `data` stops the blit early
    /// rather than reading out of bounds.
    fn draw_bitmap(&mut self, x: i16, y: i16, data: &[u8], w: i16, h: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let bytes_per_row = (w as usize).div_ceil(8);
        for row in 0..h {
            for col in 0..w {
                let idx = row as usize * bytes_per_row + col as usize / 8;
                let Some(&byte) = data.get(idx) else {
                    return;
                };
                if byte & (0x80 >> (col as u32 % 8)) != 0 {
                    self.draw_pixel(x + col, y + row, on);
                }
            }
        }
    }
}

// =============================================================================
// embedded-graphics Adapter
// =============================================================================

/// Pick a real font for a nominal text size.
///
/// Size 1 uses the built-in 6x9 font (matches the 6px layout cell);
/// larger sizes step up through ProFont, whose 18pt face is 12px wide;
/// exactly two layout cells.
fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X9,
        2 => &PROFONT_18_POINT,
        _ => &PROFONT_24_POINT,
    }
}

#[inline]
fn color(on: bool) -> BinaryColor {
    if on { BinaryColor::On } else { BinaryColor::Off }
}

/// [`DrawSurface`] implementation over any binary `DrawTarget`.
///
/// Owns the target plus the cursor/text state. Draw errors from the target
/// are discarded (`.ok()`): on a framebuffer target drawing is infallible,
/// and a widget has no sensible way to react anyway.
pub struct Canvas<D> {
    target: D,
    cursor: Point,
    text_size: u8,
    text_on: bool,
    text_opaque: bool,
}

impl<D> Canvas<D> {
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            text_size: 1,
            text_on: true,
            text_opaque: false,
        }
    }

    /// Access the wrapped target, e.g. to flush it to the panel.
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> DrawSurface for Canvas<D>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    fn width(&self) -> i16 {
        self.target.size().width as i16
    }

    fn height(&self) -> i16 {
        self.target.size().height as i16
    }

    fn draw_pixel(&mut self, x: i16, y: i16, on: bool) {
        Pixel(Point::new(x.into(), y.into()), color(on))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, on: bool) {
        Line::new(Point::new(x0.into(), y0.into()), Point::new(x1.into(), y1.into()))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_hline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        if len <= 0 {
            return;
        }
        self.draw_line(x, y, x + len - 1, y, on);
    }

    fn draw_vline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        if len <= 0 {
            return;
        }
        self.draw_line(x, y, x, y + len - 1, on);
    }

    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        Rectangle::new(Point::new(x.into(), y.into()), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        Rectangle::new(Point::new(x.into(), y.into()), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_fill(color(on)))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let rect = Rectangle::new(Point::new(x.into(), y.into()), Size::new(w as u32, h as u32));
        RoundedRectangle::with_equal_corners(rect, Size::new(r.max(0) as u32, r.max(0) as u32))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let rect = Rectangle::new(Point::new(x.into(), y.into()), Size::new(w as u32, h as u32));
        RoundedRectangle::with_equal_corners(rect, Size::new(r.max(0) as u32, r.max(0) as u32))
            .into_styled(PrimitiveStyle::with_fill(color(on)))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool) {
        if r < 0 {
            return;
        }
        Circle::with_center(Point::new(cx.into(), cy.into()), 2 * r as u32 + 1)
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool) {
        if r < 0 {
            return;
        }
        Circle::with_center(Point::new(cx.into(), cy.into()), 2 * r as u32 + 1)
            .into_styled(PrimitiveStyle::with_fill(color(on)))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool) {
        Triangle::new(
            Point::new(x0.into(), y0.into()),
            Point::new(x1.into(), y1.into()),
            Point::new(x2.into(), y2.into()),
        )
        .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
        .draw(&mut self.target)
        .ok();
    }

    fn fill_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool) {
        Triangle::new(
            Point::new(x0.into(), y0.into()),
            Point::new(x1.into(), y1.into()),
            Point::new(x2.into(), y2.into()),
        )
        .into_styled(PrimitiveStyle::with_fill(color(on)))
        .draw(&mut self.target)
        .ok();
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor = Point::new(x.into(), y.into());
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.clamp(1, 4);
    }

    fn set_text_color(&mut self, on: bool, opaque_bg: bool) {
        self.text_on = on;
        self.text_opaque = opaque_bg;
    }

    fn print(&mut self, text: &str) {
        let font = font_for_size(self.text_size);
        let mut builder = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(color(self.text_on));
        if self.text_opaque {
            builder = builder.background_color(color(!self.text_on));
        }
        let style = builder.build();
        if let Ok(next) =
            Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.target)
        {
            // Chain subsequent prints on the same line.
            self.cursor.x = next.x;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
