//! Recording draw surface for unit tests.
//!
//! Logs every primitive call instead of rasterizing, so tests can assert
//! on draw order, call counts and coordinates (e.g. "two line segments and
//! zero point markers"). Only compiled for tests, so `std` collections are
//! fine here.

use crate::surface::DrawSurface;

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Pixel { x: i16, y: i16, on: bool },
    Line { x0: i16, y0: i16, x1: i16, y1: i16, on: bool },
    HLine { x: i16, y: i16, len: i16, on: bool },
    VLine { x: i16, y: i16, len: i16, on: bool },
    Rect { x: i16, y: i16, w: i16, h: i16, on: bool, filled: bool },
    RoundRect { x: i16, y: i16, w: i16, h: i16, r: i16, on: bool, filled: bool },
    Circle { cx: i16, cy: i16, r: i16, on: bool, filled: bool },
    Triangle { x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool, filled: bool },
    Cursor { x: i16, y: i16 },
    TextSize { size: u8 },
    TextColor { on: bool, opaque_bg: bool },
    Print { text: String, x: i16, y: i16, size: u8 },
}

/// A [`DrawSurface`] that records calls and tracks cursor state.
pub struct RecordingSurface {
    width: i16,
    height: i16,
    calls: Vec<DrawCall>,
    cursor: (i16, i16),
    text_size: u8,
}

impl RecordingSurface {
    pub fn new(width: i16, height: i16) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            cursor: (0, 0),
            text_size: 1,
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of single-pixel calls with the given color.
    pub fn pixel_count(&self, on: bool) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Pixel { on: p, .. } if *p == on))
            .count()
    }

    /// Number of `draw_line` calls (fast h/v lines not included).
    pub fn line_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count()
    }

    /// All printed text concatenated in call order.
    pub fn printed(&self) -> String {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Print { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The recorded `Print` calls, in order.
    pub fn prints(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Print { .. }))
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> i16 {
        self.width
    }

    fn height(&self) -> i16 {
        self.height
    }

    fn draw_pixel(&mut self, x: i16, y: i16, on: bool) {
        self.calls.push(DrawCall::Pixel { x, y, on });
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, on: bool) {
        self.calls.push(DrawCall::Line { x0, y0, x1, y1, on });
    }

    fn draw_hline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        self.calls.push(DrawCall::HLine { x, y, len, on });
    }

    fn draw_vline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        self.calls.push(DrawCall::VLine { x, y, len, on });
    }

    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.calls.push(DrawCall::Rect { x, y, w, h, on, filled: false });
    }

    fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.calls.push(DrawCall::Rect { x, y, w, h, on, filled: true });
    }

    fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, on: bool) {
        self.calls.push(DrawCall::RoundRect { x, y, w, h, r, on, filled: false });
    }

    fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, on: bool) {
        self.calls.push(DrawCall::RoundRect { x, y, w, h, r, on, filled: true });
    }

    fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool) {
        self.calls.push(DrawCall::Circle { cx, cy, r, on, filled: false });
    }

    fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool) {
        self.calls.push(DrawCall::Circle { cx, cy, r, on, filled: true });
    }

    fn draw_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool) {
        self.calls
            .push(DrawCall::Triangle { x0, y0, x1, y1, x2, y2, on, filled: false });
    }

    fn fill_triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, on: bool) {
        self.calls
            .push(DrawCall::Triangle { x0, y0, x1, y1, x2, y2, on, filled: true });
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor = (x, y);
        self.calls.push(DrawCall::Cursor { x, y });
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.clamp(1, 4);
        self.calls.push(DrawCall::TextSize { size: self.text_size });
    }

    fn set_text_color(&mut self, on: bool, opaque_bg: bool) {
        self.calls.push(DrawCall::TextColor { on, opaque_bg });
    }

    fn print(&mut self, text: &str) {
        self.calls.push(DrawCall::Print {
            text: text.to_string(),
            x: self.cursor.0,
            y: self.cursor.1,
            size: self.text_size,
        });
        // Advance the cursor like a real renderer would.
        self.cursor.0 += text.len() as i16 * crate::config::CHAR_WIDTH * self.text_size as i16;
    }
}
