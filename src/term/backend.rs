//! Terminal backend abstraction.
//!
//! The dispatch core draws through these traits. Production uses the
//! crossterm implementation; tests and headless embeddings use the mock.

use crate::config::BorderChars;
use crate::error::Result;
use crate::term::input::Key;

/// A rectangular region in absolute screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(col: u16, row: u16, width: u16, height: u16) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    /// Whether `other` is a non-degenerate region lying fully inside this one.
    pub fn contains(&self, other: &Rect) -> bool {
        other.width > 0
            && other.height > 0
            && other.col >= self.col
            && other.row >= self.row
            && u32::from(other.col) + u32::from(other.width)
                <= u32::from(self.col) + u32::from(self.width)
            && u32::from(other.row) + u32::from(other.height)
                <= u32::from(self.row) + u32::from(self.height)
    }
}

/// One drawable window region.
pub trait Surface {
    /// Region covered by this surface, in absolute screen cells.
    fn rect(&self) -> Rect;

    /// Write `text` starting at `(row, col)` relative to this surface,
    /// clipped to the surface bounds. No trailing line break.
    fn put_text(&mut self, row: i32, col: i32, text: &str) -> Result<()>;

    /// Draw a single-line border on the surface's outermost cells.
    fn draw_border(&mut self, chars: &BorderChars) -> Result<()>;

    /// Carve a nested sub-region at a relative offset. Fails when the
    /// requested region is degenerate or exceeds this surface's bounds.
    fn carve(&self, height: u16, width: u16, row: u16, col: u16) -> Result<Box<dyn Surface>>;

    /// Make pending output for this surface visible.
    fn flush(&mut self) -> Result<()>;
}

/// The whole-terminal capability.
pub trait Screen {
    /// Enter raw, full-screen terminal mode.
    fn enter(&mut self) -> Result<()>;

    /// Restore the normal terminal mode.
    fn leave(&mut self) -> Result<()>;

    /// Surface covering the entire screen.
    fn root_surface(&mut self) -> Result<Box<dyn Surface>>;

    /// Block until one input event arrives.
    fn read_key(&mut self) -> Result<Key>;

    /// Force the whole physical screen to show its pending output,
    /// independent of any single window.
    fn refresh_all(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let parent = Rect::new(2, 1, 20, 10);

        assert!(parent.contains(&Rect::new(2, 1, 20, 10)));
        assert!(parent.contains(&Rect::new(5, 3, 4, 2)));

        // outside on each edge
        assert!(!parent.contains(&Rect::new(1, 1, 4, 2)));
        assert!(!parent.contains(&Rect::new(2, 0, 4, 2)));
        assert!(!parent.contains(&Rect::new(20, 1, 4, 2)));
        assert!(!parent.contains(&Rect::new(2, 10, 4, 2)));

        // degenerate regions never fit
        assert!(!parent.contains(&Rect::new(5, 3, 0, 2)));
        assert!(!parent.contains(&Rect::new(5, 3, 4, 0)));
    }

    #[test]
    fn test_rect_contains_no_overflow() {
        let parent = Rect::new(0, 0, 80, 24);
        assert!(!parent.contains(&Rect::new(1, 1, u16::MAX, u16::MAX)));
    }
}
