//! Segment input source

/// Trait for the text field that holds the raw segment list
pub trait InputSource {
    /// Current raw text, or `None` if the surface has no input field
    fn text(&self) -> Option<&str>;
}

/// Input source for surfaces without a text field
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn text(&self) -> Option<&str> {
        None
    }
}

impl InputSource for &str {
    fn text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl<const N: usize> InputSource for heapless::String<N> {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}
