//! Display backend trait
//!
//! Interface between the text renderer and a character display.

use wheelspin_core::traits::RenderError;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row or column outside the display
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

impl From<DisplayError> for RenderError {
    fn from(err: DisplayError) -> Self {
        match err {
            DisplayError::NotInitialized => RenderError::SurfaceUnavailable,
            DisplayError::Communication | DisplayError::InvalidCoordinates => RenderError::Backend,
        }
    }
}

/// Character display backend
///
/// Implementations handle the specifics of the panel or terminal.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region on the specified row
    ///
    /// `end_col` is exclusive.
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Push buffered content to the hardware
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Display size as (columns, rows) in characters
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display can accept commands
    fn is_ready(&self) -> bool;
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        (**self).draw_text(row, col, text)
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        (**self).invert_region(row, start_col, end_col)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
