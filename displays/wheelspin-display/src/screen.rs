//! Screen buffer
//!
//! Character buffer that is pushed to a `DisplayBackend` only when its
//! content changed.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows (128x64 OLED, 8px font)
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns
pub const SCREEN_COLS: usize = 21;

/// Byte capacity per line; a column may hold a multi-byte character
pub const LINE_BYTES: usize = SCREEN_COLS * 4;

/// A single screen line
pub type Line = String<LINE_BYTES>;

/// Text-mode screen buffer
#[derive(Clone)]
pub struct Screen {
    lines: [Line; SCREEN_ROWS],
    /// Row drawn inverted across its full width
    highlight: Option<u8>,
    /// Whether the backend is out of date
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlight: None,
            dirty: true,
        }
    }

    /// Clear all lines and the highlight
    pub fn clear(&mut self) {
        for row in 0..SCREEN_ROWS {
            self.set_line(row, "");
        }
        self.set_highlight(None);
    }

    /// Set the content of a row, cut to `SCREEN_COLS` characters
    ///
    /// Marks the screen dirty only when the row actually changes.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let text = fit_columns(text, SCREEN_COLS);
        if line.as_str() != text {
            line.clear();
            let _ = line.push_str(text);
            self.dirty = true;
        }
    }

    /// Content of a row (empty for rows off screen)
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|s| s.as_str()).unwrap_or("")
    }

    /// Highlight a row, or clear the highlight with `None`
    pub fn set_highlight(&mut self, row: Option<u8>) {
        let row = row.filter(|r| (*r as usize) < SCREEN_ROWS);
        if self.highlight != row {
            self.highlight = row;
            self.dirty = true;
        }
    }

    /// Highlighted row
    pub fn highlight(&self) -> Option<u8> {
        self.highlight
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as dirty (forces the next render)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Push the buffer to a backend if anything changed
    ///
    /// Rows and columns the backend cannot show are skipped. The screen
    /// stays dirty when the backend fails, so the next call retries.
    pub fn render_to<B: DisplayBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<(), DisplayError> {
        if !self.dirty {
            return Ok(());
        }
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        let (cols, rows) = backend.dimensions();
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate().take(rows as usize) {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, fit_columns(line, cols as usize))?;
            }
        }
        if let Some(row) = self.highlight.filter(|r| *r < rows) {
            backend.invert_region(row, 0, cols.min(SCREEN_COLS as u8))?;
        }
        backend.flush()?;

        self.dirty = false;
        Ok(())
    }
}

/// Longest prefix of `text` that is at most `cols` characters
fn fit_columns(text: &str, cols: usize) -> &str {
    match text.char_indices().nth(cols) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_line_truncates_on_columns() {
        let mut screen = Screen::new();
        screen.set_line(0, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(screen.line(0), "abcdefghijklmnopqrstu");

        // Three-byte characters are cut by column, not by byte
        screen.set_line(1, "ああああああああああああああああああああああああああ");
        assert_eq!(screen.line(1).chars().count(), SCREEN_COLS);
    }

    #[test]
    fn test_off_screen_rows_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "nope");
        screen.set_highlight(Some(SCREEN_ROWS as u8));
        assert_eq!(screen.line(SCREEN_ROWS), "");
        assert_eq!(screen.highlight(), None);
    }

    #[test]
    fn test_dirty_only_on_change() {
        let mut screen = Screen::new();
        screen.set_line(0, "Hello");
        screen.dirty = false;

        screen.set_line(0, "Hello");
        assert!(!screen.is_dirty());

        screen.set_line(0, "World");
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.set_line(3, "Hello");
        screen.set_highlight(Some(3));
        screen.clear();
        assert_eq!(screen.line(3), "");
        assert_eq!(screen.highlight(), None);
        assert!(screen.lines().all(|l| l.is_empty()));
    }
}
