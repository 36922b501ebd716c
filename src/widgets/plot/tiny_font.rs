//! Embedded 3x5 glyph set for axis labels in cramped plots.
//!
//! The native font needs an 8px row per label; a 24px-tall plot cannot
//! afford that. This fallback covers exactly what tick labels and sensor
//! units need: digits, minus, decimal point and the unit letters
//! `C`/`T`/`H`/`%`. Glyphs are 3px wide with a 1px gap, scaled by an
//! integer factor.
//!
//! Unknown characters advance the cursor without drawing, so a stray
//! character degrades to a gap instead of garbage pixels.

use crate::surface::DrawSurface;

/// Rows of one glyph, low 3 bits used, MSB of the triple is the left pixel.
type Glyph = [u8; 5];

const GLYPH_0: Glyph = [0b111, 0b101, 0b101, 0b101, 0b111];
const GLYPH_1: Glyph = [0b010, 0b110, 0b010, 0b010, 0b111];
const GLYPH_2: Glyph = [0b111, 0b001, 0b111, 0b100, 0b111];
const GLYPH_3: Glyph = [0b111, 0b001, 0b111, 0b001, 0b111];
const GLYPH_4: Glyph = [0b101, 0b101, 0b111, 0b001, 0b001];
const GLYPH_5: Glyph = [0b111, 0b100, 0b111, 0b001, 0b111];
const GLYPH_6: Glyph = [0b111, 0b100, 0b111, 0b101, 0b111];
const GLYPH_7: Glyph = [0b111, 0b001, 0b001, 0b010, 0b010];
const GLYPH_8: Glyph = [0b111, 0b101, 0b111, 0b101, 0b111];
const GLYPH_9: Glyph = [0b111, 0b101, 0b111, 0b001, 0b111];
const GLYPH_MINUS: Glyph = [0b000, 0b000, 0b111, 0b000, 0b000];
const GLYPH_DOT: Glyph = [0b000, 0b000, 0b000, 0b000, 0b010];
const GLYPH_C: Glyph = [0b111, 0b100, 0b100, 0b100, 0b111];
const GLYPH_T: Glyph = [0b111, 0b010, 0b010, 0b010, 0b010];
const GLYPH_H: Glyph = [0b101, 0b101, 0b111, 0b101, 0b101];
const GLYPH_PERCENT: Glyph = [0b101, 0b001, 0b010, 0b100, 0b101];

fn glyph_for(c: char) -> Option<&'static Glyph> {
    match c {
        '0' => Some(&GLYPH_0),
        '1' => Some(&GLYPH_1),
        '2' => Some(&GLYPH_2),
        '3' => Some(&GLYPH_3),
        '4' => Some(&GLYPH_4),
        '5' => Some(&GLYPH_5),
        '6' => Some(&GLYPH_6),
        '7' => Some(&GLYPH_7),
        '8' => Some(&GLYPH_8),
        '9' => Some(&GLYPH_9),
        '-' => Some(&GLYPH_MINUS),
        '.' => Some(&GLYPH_DOT),
        'C' => Some(&GLYPH_C),
        'T' => Some(&GLYPH_T),
        'H' => Some(&GLYPH_H),
        '%' => Some(&GLYPH_PERCENT),
        _ => None,
    }
}

/// Clamp a scale factor to at least 1.
const fn clamp_scale(scale: u8) -> i16 {
    if scale == 0 { 1 } else { scale as i16 }
}

/// Glyph advance (3px glyph + 1px gap) at a given scale.
const fn advance(scale: u8) -> i16 {
    4 * clamp_scale(scale)
}

/// Rendered width of `text`: advances minus the trailing gap.
pub fn text_width(text: &str, scale: u8) -> i16 {
    let chars = text.chars().count() as i16;
    if chars == 0 {
        return 0;
    }
    chars * advance(scale) - clamp_scale(scale)
}

/// Rendered height of one line.
pub const fn text_height(scale: u8) -> i16 {
    5 * clamp_scale(scale)
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Each set glyph bit becomes a `scale` x `scale` filled block, so the
/// font scales without resampling.
pub fn draw_text(surface: &mut dyn DrawSurface, x: i16, y: i16, text: &str, scale: u8) {
    let scale = scale.max(1) as i16;
    let mut cx = x;
    for c in text.chars() {
        if let Some(glyph) = glyph_for(c) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..3i16 {
                    if bits & (0b100 >> col) != 0 {
                        let px = cx + col * scale;
                        let py = y + row as i16 * scale;
                        if scale == 1 {
                            surface.draw_pixel(px, py, true);
                        } else {
                            surface.fill_rect(px, py, scale, scale, true);
                        }
                    }
                }
            }
        }
        cx += 4 * scale;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_surface::RecordingSurface;

    #[test]
    fn test_text_width_accounts_for_gaps() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("7", 1), 3, "single glyph has no trailing gap");
        assert_eq!(text_width("-1.5", 1), 15, "4 glyphs: 4*4 - 1");
        assert_eq!(text_width("42", 2), 14, "scaled: 2*8 - 2");
    }

    #[test]
    fn test_digit_pixel_budget() {
        // '1' has 1+2+1+1+3 = 8 set bits at scale 1.
        let mut s = RecordingSurface::new(128, 64);
        draw_text(&mut s, 0, 0, "1", 1);
        assert_eq!(s.pixel_count(true), 8);
    }

    #[test]
    fn test_unknown_char_advances_without_drawing() {
        let mut s = RecordingSurface::new(128, 64);
        draw_text(&mut s, 0, 0, "?", 1);
        assert_eq!(s.pixel_count(true), 0, "unknown glyphs draw nothing");

        // "?5" places the '5' at the second cell.
        s.clear();
        draw_text(&mut s, 0, 0, "?5", 1);
        let min_x = s
            .calls()
            .iter()
            .filter_map(|c| match c {
                crate::test_surface::DrawCall::Pixel { x, .. } => Some(*x),
                _ => None,
            })
            .min()
            .unwrap();
        assert_eq!(min_x, 4, "second glyph starts one advance in");
    }

    #[test]
    fn test_scale_uses_filled_blocks() {
        use crate::test_surface::DrawCall;
        let mut s = RecordingSurface::new(128, 64);
        draw_text(&mut s, 0, 0, "-", 2);
        // '-' has 3 set bits; at scale 2 each becomes a 2x2 fill_rect.
        let fills = s
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect { filled: true, w: 2, h: 2, .. }))
            .count();
        assert_eq!(fills, 3);
    }
}
