//! Word-wrapping text widget.
//!
//! Layout is done against the classic 6x8 character cell grid (times the
//! text size), which keeps the math integer-only and matches how the
//! rest of the layer budgets text space. Wrapping prefers the last space
//! that fits on the line and falls back to a hard break inside
//! unbreakable words.
//!
//! With animation enabled the box renders one extra character per draw
//! call, a typewriter reveal that restarts whenever the text changes.

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::config::{CHAR_HEIGHT, CHAR_WIDTH, MAX_TEXT_CHARS};
use crate::surface::DrawSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Inner padding between the widget edge and the text, in pixels.
const PADDING: i16 = 2;

pub struct TextBox {
    base: AssetBase,
    text: heapless::String<MAX_TEXT_CHARS>,
    text_size: u8,
    alignment: TextAlign,
    word_wrap: bool,
    fill_background: bool,
    animation_frame: usize,
}

impl TextBox {
    pub fn new(x: i16, y: i16, width: i16, height: i16, text: &str) -> Self {
        let mut text_box = Self {
            base: AssetBase::new(x, y, width, height),
            text: heapless::String::new(),
            text_size: 1,
            alignment: TextAlign::Left,
            word_wrap: true,
            fill_background: false,
            animation_frame: 0,
        };
        text_box.store(text);
        text_box
    }

    fn store(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }

    /// Replace the text; restarts the typewriter animation. Input beyond
    /// the buffer capacity is dropped.
    pub fn set_text(&mut self, text: &str) {
        self.store(text);
        self.animation_frame = 0;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text_size(&mut self, size: u8) {
        if (1..=4).contains(&size) {
            self.text_size = size;
        }
    }

    pub fn text_size(&self) -> u8 {
        self.text_size
    }

    pub fn set_alignment(&mut self, alignment: TextAlign) {
        self.alignment = alignment;
    }

    pub fn alignment(&self) -> TextAlign {
        self.alignment
    }

    pub fn set_word_wrap(&mut self, wrap: bool) {
        self.word_wrap = wrap;
    }

    /// Paint the interior off before drawing, so the box overwrites
    /// whatever was underneath it.
    pub fn set_fill_background(&mut self, fill: bool) {
        self.fill_background = fill;
    }

    // -------------------------------------------------------------------------
    // Animation
    // -------------------------------------------------------------------------

    pub fn reset_animation(&mut self) {
        self.animation_frame = 0;
    }

    pub fn advance_animation(&mut self) {
        if self.animation_frame < self.text.chars().count() {
            self.animation_frame += 1;
        }
    }

    pub fn animation_frame(&self) -> usize {
        self.animation_frame
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    fn char_width(&self) -> i16 {
        CHAR_WIDTH * self.text_size as i16
    }

    fn max_chars(&self) -> usize {
        let max_width = self.base.width() - 2 * PADDING;
        (max_width / self.char_width()).max(0) as usize
    }

    /// How many lines the current text wraps to at the current size.
    pub fn calculate_lines(&self) -> usize {
        if self.text.is_empty() {
            return 0;
        }
        if !self.word_wrap {
            return 1;
        }
        let max_chars = self.max_chars();
        if max_chars == 0 {
            return 0;
        }
        let mut remaining = self.text.as_str();
        let mut lines = 0;
        while !remaining.is_empty() {
            let (_, rest) = split_line(remaining, max_chars);
            remaining = rest;
            lines += 1;
        }
        lines
    }

    fn line_x(&self, line_chars: usize) -> i16 {
        let line_width = line_chars as i16 * self.char_width();
        match self.alignment {
            TextAlign::Left => self.base.x() + PADDING,
            TextAlign::Center => self.base.x() + (self.base.width() - line_width) / 2,
            TextAlign::Right => self.base.x() + self.base.width() - line_width - PADDING,
        }
    }

    fn draw_line(&self, surface: &mut dyn DrawSurface, line: &str, y: i16) {
        surface.set_cursor(self.line_x(line.chars().count()), y);
        surface.print(line);
    }
}

/// Split off the next display line: the whole text if it fits, otherwise
/// up to the last space within `max_chars`, or a hard break when there is
/// none. The separating space is consumed.
fn split_line(text: &str, max_chars: usize) -> (&str, &str) {
    if text.chars().count() <= max_chars {
        return (text, "");
    }
    let limit = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(byte, _)| byte);
    match text[..limit].rfind(' ') {
        Some(pos) if pos > 0 => (&text[..pos], &text[pos + 1..]),
        _ => (&text[..limit], &text[limit..]),
    }
}

impl Asset for TextBox {
    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn kind(&self) -> AssetKind {
        AssetKind::TextBox
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        if !self.base.is_visible() {
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
        if self.fill_background {
            surface.fill_rect(
                self.base.x() + 1,
                self.base.y() + 1,
                self.base.width() - 2,
                self.base.height() - 2,
                false,
            );
        }

        surface.set_text_size(self.text_size);
        surface.set_text_color(true, self.fill_background);

        // Typewriter reveal: show a prefix and grow it by one per draw.
        let total_chars = self.text.chars().count();
        let shown = if self.base.is_animated() && self.animation_frame < total_chars {
            let end = self
                .text
                .char_indices()
                .nth(self.animation_frame)
                .map_or(self.text.len(), |(byte, _)| byte);
            self.animation_frame += 1;
            &self.text[..end]
        } else {
            self.text.as_str()
        };

        let char_height = CHAR_HEIGHT * self.text_size as i16;
        let text_y = self.base.y() + PADDING;
        let max_chars = self.max_chars();
        if max_chars == 0 {
            return;
        }

        if self.word_wrap {
            let mut remaining = shown;
            let mut current_y = text_y;
            let bottom = self.base.y() + self.base.height() - PADDING;
            while !remaining.is_empty() && current_y + char_height <= bottom {
                let (line, rest) = split_line(remaining, max_chars);
                self.draw_line(surface, line, current_y);
                remaining = rest;
                current_y += char_height;
            }
        } else {
            let (line, _) = split_line(shown, max_chars);
            self.draw_line(surface, line, text_y);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
