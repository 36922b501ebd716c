//! Fixed-capacity text grid.
//!
//! Cells live in a flat row-major `heapless` buffer, so a table never
//! allocates. The constructor clamps the requested shape to the
//! compile-time capacities rather than failing; callers that care can
//! check [`Table::rows`] and [`Table::cols`] afterwards.
//!
//! Column widths either auto-fit (equal split of the inner width,
//! remainder to the last column) or are set per column, which switches
//! auto-fit off. Rows that would cross the bottom edge are skipped
//! whole; cells that would cross the right edge are clipped.

use core::fmt::Write as _;

use crate::asset::{Asset, AssetBase, AssetKind};
use crate::config::{CHAR_HEIGHT, CHAR_WIDTH, MAX_CELL_CHARS, MAX_TABLE_CELLS, MAX_TABLE_COLS};
use crate::surface::DrawSurface;

type CellBuf = heapless::String<MAX_CELL_CHARS>;

pub struct Table {
    base: AssetBase,
    cells: heapless::Vec<CellBuf, MAX_TABLE_CELLS>,
    rows: usize,
    cols: usize,
    col_widths: heapless::Vec<i16, MAX_TABLE_COLS>,
    row_height: i16,
    text_size: u8,
    show_headers: bool,
    show_grid_lines: bool,
    auto_fit: bool,
}

impl Table {
    /// New `rows` x `cols` table. `cols` is clamped to `MAX_TABLE_COLS`
    /// and `rows` so that the cell count stays within `MAX_TABLE_CELLS`.
    pub fn new(x: i16, y: i16, width: i16, height: i16, rows: usize, cols: usize) -> Self {
        let cols = cols.min(MAX_TABLE_COLS);
        let rows = if cols == 0 {
            0
        } else {
            rows.min(MAX_TABLE_CELLS / cols)
        };
        let mut table = Self {
            base: AssetBase::new(x, y, width, height),
            cells: heapless::Vec::new(),
            rows,
            cols,
            col_widths: heapless::Vec::new(),
            row_height: 10,
            text_size: 1,
            show_headers: true,
            show_grid_lines: true,
            auto_fit: true,
        };
        for _ in 0..rows * cols {
            table.cells.push(CellBuf::new()).ok();
        }
        for _ in 0..cols {
            table.col_widths.push(0).ok();
        }
        table.calculate_column_widths();
        table
    }

    // -------------------------------------------------------------------------
    // Cell Content
    // -------------------------------------------------------------------------

    fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Store `text` in a cell, truncated to the cell buffer capacity.
    /// Returns false when the coordinates are out of bounds.
    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) -> bool {
        let Some(index) = self.cell_index(row, col) else {
            return false;
        };
        let buf = &mut self.cells[index];
        buf.clear();
        for ch in text.chars() {
            if buf.push(ch).is_err() {
                break;
            }
        }
        true
    }

    pub fn set_cell_i32(&mut self, row: usize, col: usize, value: i32) -> bool {
        let mut buf = CellBuf::new();
        write!(buf, "{value}").ok();
        self.set_cell(row, col, &buf)
    }

    pub fn set_cell_f32(&mut self, row: usize, col: usize, value: f32, decimals: usize) -> bool {
        let mut buf = CellBuf::new();
        write!(buf, "{value:.decimals$}").ok();
        self.set_cell(row, col, &buf)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cell_index(row, col).map(|i| self.cells[i].as_str())
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) {
        if let Some(index) = self.cell_index(row, col) {
            self.cells[index].clear();
        }
    }

    pub fn clear_all_cells(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reshape the grid, keeping the contents of cells whose coordinates
    /// exist in both shapes. Fails on a zero dimension or a shape beyond
    /// the compile-time capacities.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize) -> bool {
        if new_rows == 0
            || new_cols == 0
            || new_cols > MAX_TABLE_COLS
            || new_rows * new_cols > MAX_TABLE_CELLS
        {
            return false;
        }

        let mut new_cells: heapless::Vec<CellBuf, MAX_TABLE_CELLS> = heapless::Vec::new();
        for r in 0..new_rows {
            for c in 0..new_cols {
                let kept = if r < self.rows && c < self.cols {
                    self.cells[r * self.cols + c].clone()
                } else {
                    CellBuf::new()
                };
                new_cells.push(kept).ok();
            }
        }

        let mut new_widths: heapless::Vec<i16, MAX_TABLE_COLS> = heapless::Vec::new();
        let default_width = self.base.width() / new_cols as i16;
        for c in 0..new_cols {
            let w = self.col_widths.get(c).copied().unwrap_or(default_width);
            new_widths.push(w).ok();
        }

        self.cells = new_cells;
        self.col_widths = new_widths;
        self.rows = new_rows;
        self.cols = new_cols;
        if self.auto_fit {
            self.calculate_column_widths();
        }
        true
    }

    // -------------------------------------------------------------------------
    // Column Widths
    // -------------------------------------------------------------------------

    /// Set one column's width in pixels; turns auto-fit off. Zero and
    /// negative widths are rejected.
    pub fn set_column_width(&mut self, col: usize, width: i16) {
        if col < self.cols && width > 0 {
            self.col_widths[col] = width;
            self.auto_fit = false;
        }
    }

    pub fn column_width(&self, col: usize) -> i16 {
        self.col_widths.get(col).copied().unwrap_or(0)
    }

    pub fn set_all_column_widths(&mut self, width: i16) {
        if width > 0 {
            for w in &mut self.col_widths {
                *w = width;
            }
            self.auto_fit = false;
        }
    }

    pub fn set_auto_fit_columns(&mut self, auto_fit: bool) {
        self.auto_fit = auto_fit;
        if auto_fit {
            self.calculate_column_widths();
        }
    }

    pub fn auto_fit_columns(&self) -> bool {
        self.auto_fit
    }

    /// Equal split of the inner width (widget width minus the 1px border
    /// on each side); leftover pixels go to the last column.
    fn calculate_column_widths(&mut self) {
        if self.cols == 0 {
            return;
        }
        let available = self.base.width() - 2;
        let equal = available / self.cols as i16;
        for w in &mut self.col_widths {
            *w = equal;
        }
        let remainder = available - equal * self.cols as i16;
        if remainder > 0 {
            self.col_widths[self.cols - 1] += remainder;
        }
    }

    // -------------------------------------------------------------------------
    // Display Options
    // -------------------------------------------------------------------------

    pub fn set_row_height(&mut self, height: i16) {
        if height > 0 {
            self.row_height = height;
        }
    }

    pub fn row_height(&self) -> i16 {
        self.row_height
    }

    pub fn set_text_size(&mut self, size: u8) {
        if (1..=4).contains(&size) {
            self.text_size = size;
        }
    }

    pub fn set_show_headers(&mut self, show: bool) {
        self.show_headers = show;
    }

    pub fn set_show_grid_lines(&mut self, show: bool) {
        self.show_grid_lines = show;
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn draw_cell(
        &self,
        surface: &mut dyn DrawSurface,
        row: usize,
        col: usize,
        cell_x: i16,
        cell_y: i16,
        cell_w: i16,
        cell_h: i16,
    ) {
        let Some(index) = self.cell_index(row, col) else {
            return;
        };
        let text = self.cells[index].as_str();

        surface.set_text_size(self.text_size);
        surface.set_text_color(true, false);

        let char_h = CHAR_HEIGHT * self.text_size as i16;
        let char_w = CHAR_WIDTH * self.text_size as i16;
        let text_y = cell_y + (cell_h - char_h) / 2;
        let text_x = cell_x + 2;

        // 2px padding on each side of the text.
        let max_chars = ((cell_w - 4) / char_w).max(0) as usize;
        let shown = match text.char_indices().nth(max_chars) {
            Some((byte, _)) => &text[..byte],
            None => text,
        };

        surface.set_cursor(text_x, text_y);
        surface.print(shown);

        if self.show_headers && row == 0 {
            surface.draw_hline(cell_x, cell_y + cell_h - 1, cell_w, true);
        }
    }
}

impl Asset for Table {
    fn base(&self) -> &AssetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AssetBase {
        &mut self.base
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Table
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface) {
        if !self.base.is_visible() || self.rows == 0 || self.cols == 0 {
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

        if self.auto_fit {
            self.calculate_column_widths();
        }

        let right = self.base.x() + self.base.width();
        let bottom = self.base.y() + self.base.height();
        let mut current_y = self.base.y() + 1;

        for row in 0..self.rows {
            if current_y >= bottom {
                break;
            }
            let row_h = if self.show_headers && row == 0 {
                // Header row gets a little breathing room for its underline.
                self.row_height + 2
            } else {
                self.row_height
            };
            if current_y + row_h > bottom {
                break;
            }

            let mut current_x = self.base.x() + 1;
            for col in 0..self.cols {
                if current_x >= right {
                    break;
                }
                let mut cell_w = self.col_widths[col];
                if current_x + cell_w > right {
                    cell_w = right - current_x;
                }

                self.draw_cell(surface, row, col, current_x, current_y, cell_w, row_h);

                if self.show_grid_lines && col < self.cols - 1 {
                    surface.draw_vline(current_x + cell_w, current_y, row_h, true);
                }
                current_x += cell_w;
            }

            if self.show_grid_lines && row < self.rows - 1 {
                surface.draw_hline(self.base.x() + 1, current_y + row_h, self.base.width() - 2, true);
            }
            current_y += row_h;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_surface::{DrawCall, RecordingSurface};

    // -------------------------------------------------------------------------
    // Cell Content Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_set_and_get_cell() {
        let mut table = Table::new(0, 0, 128, 40, 2, 3);
        assert!(table.set_cell(0, 0, "Temp"));
        assert!(table.set_cell_i32(1, 0, -42));
        assert!(table.set_cell_f32(1, 1, 3.26, 1));
        assert_eq!(table.cell(0, 0), Some("Temp"));
        assert_eq!(table.cell(1, 0), Some("-42"));
        assert_eq!(table.cell(1, 1), Some("3.3"));
        assert_eq!(table.cell(0, 2), Some(""));
    }

    #[test]
    fn test_out_of_bounds_cell_is_rejected() {
        let mut table = Table::new(0, 0, 128, 40, 2, 3);
        assert!(!table.set_cell(2, 0, "nope"));
        assert!(!table.set_cell(0, 3, "nope"));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn test_shape_is_clamped_to_capacity() {
        let table = Table::new(0, 0, 128, 64, 100, 100);
        assert_eq!(table.cols(), MAX_TABLE_COLS);
        assert_eq!(table.rows(), MAX_TABLE_CELLS / MAX_TABLE_COLS);
    }

    // -------------------------------------------------------------------------
    // Resize Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_resize_preserves_overlapping_cells() {
        let mut table = Table::new(0, 0, 128, 64, 3, 3);
        for r in 0..3 {
            for c in 0..3 {
                table.set_cell_i32(r, c, (r * 10 + c) as i32);
            }
        }
        assert!(table.resize(2, 2));
        assert_eq!(table.cell(0, 0), Some("0"));
        assert_eq!(table.cell(1, 1), Some("11"));
        assert_eq!(table.cell(2, 0), None, "dropped row is gone");

        assert!(table.resize(3, 3));
        assert_eq!(table.cell(1, 1), Some("11"));
        assert_eq!(table.cell(2, 2), Some(""), "regrown cells come back empty");
    }

    #[test]
    fn test_resize_rejects_invalid_shapes() {
        let mut table = Table::new(0, 0, 128, 64, 2, 2);
        assert!(!table.resize(0, 2));
        assert!(!table.resize(2, MAX_TABLE_COLS + 1));
        assert!(!table.resize(MAX_TABLE_CELLS, 2));
        assert_eq!(table.rows(), 2);
    }

    // -------------------------------------------------------------------------
    // Column Width Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_auto_fit_gives_remainder_to_last_column() {
        let table = Table::new(0, 0, 128, 40, 2, 3);
        // Inner width 126 over 3 columns: 42 each, no remainder.
        assert_eq!(table.column_width(0), 42);
        assert_eq!(table.column_width(2), 42);

        let table = Table::new(0, 0, 130, 40, 2, 3);
        // Inner width 128: 42 + 42 + 44.
        assert_eq!(table.column_width(0), 42);
        assert_eq!(table.column_width(2), 44);
    }

    #[test]
    fn test_manual_width_disables_auto_fit() {
        let mut table = Table::new(0, 0, 128, 40, 2, 3);
        assert!(table.auto_fit_columns());
        table.set_column_width(1, 60);
        assert!(!table.auto_fit_columns());
        assert_eq!(table.column_width(1), 60);

        table.set_column_width(1, 0);
        assert_eq!(table.column_width(1), 60, "zero width is rejected");
    }

    // -------------------------------------------------------------------------
    // Rendering Tests
    // -------------------------------------------------------------------------

    fn prints(s: &RecordingSurface) -> Vec<String> {
        s.calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Print { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_skips_rows_past_the_bottom() {
        // Header row 12px + one 10px row fit in 26px; the third row
        // would cross the bottom edge.
        let mut table = Table::new(0, 0, 128, 26, 3, 1);
        table.set_show_grid_lines(false);
        table.set_cell(0, 0, "A");
        table.set_cell(1, 0, "B");
        table.set_cell(2, 0, "C");

        let mut s = RecordingSurface::new(128, 64);
        table.draw(&mut s);
        let texts = prints(&s);
        assert_eq!(texts, ["A", "B"], "row C crosses the bottom and is skipped");
    }

    #[test]
    fn test_draw_truncates_long_cell_text() {
        let mut table = Table::new(0, 0, 40, 30, 1, 1);
        table.set_cell(0, 0, "TEMPERATURE");

        let mut s = RecordingSurface::new(128, 64);
        table.draw(&mut s);
        // Auto-fit column is 38px wide; (38 - 4) / 6 = 5 chars.
        assert_eq!(prints(&s), ["TEMPE"]);
    }

    #[test]
    fn test_grid_lines_between_cells_only() {
        let mut table = Table::new(0, 0, 128, 40, 2, 2);
        table.set_show_headers(false);

        let mut s = RecordingSurface::new(128, 64);
        table.draw(&mut s);

        let vlines = s
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::VLine { .. }))
            .count();
        let hlines = s
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::HLine { .. }))
            .count();
        assert_eq!(vlines, 2, "one separator per row, none after the last column");
        assert_eq!(hlines, 1, "one separator between the two rows");
    }
}
