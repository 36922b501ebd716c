//! 1-bit image widget.
//!
//! Data is in the classic OLED bitmap layout: row-major, MSB-first, each
//! row padded to a whole byte. Only set bits are painted, so zero bits
//! are transparent and the widget composes over whatever is already on
//! screen. The `inverted` flag paints set bits off instead of on.
//!
//! Images either borrow `&'static` data (the usual case for art baked
//! into flash) or own a small generated buffer, as the built-in pattern
//! generators produce.

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::config::MAX_BITMAP_BYTES;
use crate::surface::DrawSurface;

enum BitmapData {
    None,
    Static(&'static [u8]),
    Owned(heapless::Vec<u8, MAX_BITMAP_BYTES>),
}

impl BitmapData {
    fn bytes(&self) -> Option<&[u8]> {
        match self {
            BitmapData::None => None,
            BitmapData::Static(data) => Some(data),
            BitmapData::Owned(data) => Some(data),
        }
    }
}

pub struct Bitmap {
    base: AssetBase,
    data: BitmapData,
    inverted: bool,
}

impl Bitmap {
    /// New image borrowing `data` laid out for a `width` x `height` frame.
    pub fn new(x: i16, y: i16, width: i16, height: i16, data: &'static [u8]) -> Self {
        Self {
            base: AssetBase::new(x, y, width, height),
            data: BitmapData::Static(data),
            inverted: false,
        }
    }

    /// New image with no data yet; draws nothing until data is set or
    /// generated.
    pub fn empty(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            base: AssetBase::new(x, y, width, height),
            data: BitmapData::None,
            inverted: false,
        }
    }

    pub fn set_data(&mut self, data: &'static [u8]) {
        self.data = BitmapData::Static(data);
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.bytes()
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    // -------------------------------------------------------------------------
    // Pattern Generators
    // -------------------------------------------------------------------------

    fn row_bytes(&self) -> usize {
        (self.base.width().max(0) as usize).div_ceil(8)
    }

    /// Allocate a zeroed owned buffer sized for the current frame, or
    /// `None` when the frame needs more than `MAX_BITMAP_BYTES`.
    fn blank_buffer(&self) -> Option<heapless::Vec<u8, MAX_BITMAP_BYTES>> {
        let needed = self.row_bytes() * self.base.height().max(0) as usize;
        if needed > MAX_BITMAP_BYTES {
            return None;
        }
        let mut buf = heapless::Vec::new();
        buf.resize(needed, 0).ok();
        Some(buf)
    }

    fn set_bit(buf: &mut [u8], row_bytes: usize, row: usize, col: usize) {
        buf[row * row_bytes + col / 8] |= 0x80 >> (col % 8);
    }

    /// Fill the frame from a row-major on/off pattern; input past the
    /// frame is ignored and a short input leaves the rest clear. Fails
    /// only when the frame exceeds the owned-buffer capacity.
    pub fn set_pattern(&mut self, pattern: &[bool]) -> bool {
        let Some(mut buf) = self.blank_buffer() else {
            return false;
        };
        let width = self.base.width() as usize;
        let row_bytes = self.row_bytes();
        for (i, &on) in pattern.iter().enumerate().take(width * self.base.height() as usize) {
            if on {
                Self::set_bit(&mut buf, row_bytes, i / width, i % width);
            }
        }
        self.data = BitmapData::Owned(buf);
        true
    }

    /// Generate a checkerboard of `square_size` pixel squares (clamped
    /// to at least 1), starting with a lit square at the top left.
    pub fn make_checkerboard(&mut self, square_size: i16) -> bool {
        let Some(mut buf) = self.blank_buffer() else {
            return false;
        };
        let square = square_size.max(1);
        let row_bytes = self.row_bytes();
        for row in 0..self.base.height() {
            for col in 0..self.base.width() {
                if (row / square + col / square) % 2 == 0 {
                    Self::set_bit(&mut buf, row_bytes, row as usize, col as usize);
                }
            }
        }
        self.data = BitmapData::Owned(buf);
        true
    }

    /// Generate a dither gradient, dense at the left (horizontal) or top
    /// (vertical) edge and fading out toward the other side.
    pub fn make_gradient(&mut self, horizontal: bool) -> bool {
        let Some(mut buf) = self.blank_buffer() else {
            return false;
        };
        let row_bytes = self.row_bytes();
        for row in 0..self.base.height() {
            for col in 0..self.base.width() {
                let threshold = if horizontal {
                    i32::from(col) * 100 / i32::from(self.base.width().max(1))
                } else {
                    i32::from(row) * 100 / i32::from(self.base.height().max(1))
                };
                if i32::from(row + col) % 4 < 4 - threshold / 25 {
                    Self::set_bit(&mut buf, row_bytes, row as usize, col as usize);
                }
            }
        }
        self.data = BitmapData::Owned(buf);
        true
    }
}

impl Asset for Bitmap {
    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Bitmap
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        if !self.base.is_visible() {
            return;
        }
        let Some(data) = self.data.bytes() else {
            return;
        };

        if self.base.has_border() {
            surface.draw_rect(
                self.base.x(),
                self.base.y(),
                self.base.width(),
                self.base.height(),
                true,
            );
        }

        surface.draw_bitmap(
            self.base.x(),
            self.base.y(),
            data,
            self.base.width(),
            self.base.height(),
            !self.inverted,
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
