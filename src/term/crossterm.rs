//! Crossterm-backed screen and surfaces.
//!
//! Drawing queues into the process stdout buffer; `flush` makes it visible.
//! Every surface shares that one buffer, so flushing any window may also
//! reveal pending output queued by other windows (screen-wide flush). This
//! is a documented side effect of the protocol, not a bug.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::config::BorderChars;
use crate::error::Result;

use super::backend::{Rect, Screen, Surface};
use super::input::Key;

/// Whole-terminal screen on crossterm.
#[derive(Debug, Default)]
pub struct CrosstermScreen;

impl CrosstermScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for CrosstermScreen {
    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        debug!("entered raw terminal mode");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        debug!("left raw terminal mode");
        Ok(())
    }

    fn root_surface(&mut self) -> Result<Box<dyn Surface>> {
        let (cols, rows) = terminal::size()?;
        Ok(Box::new(CrosstermSurface {
            rect: Rect::new(0, 0, cols, rows),
        }))
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                // some platforms report both press and release
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if let Some(decoded) = Key::from_event(&key) {
                    return Ok(decoded);
                }
            }
        }
    }

    fn refresh_all(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

/// One rectangular window on the crossterm screen.
struct CrosstermSurface {
    rect: Rect,
}

impl Surface for CrosstermSurface {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn put_text(&mut self, row: i32, col: i32, text: &str) -> Result<()> {
        if row < 0 || row >= i32::from(self.rect.height) {
            return Ok(());
        }
        let abs_row = self.rect.row + row as u16;
        let win_width = i32::from(self.rect.width);

        // keep the characters whose cells fall inside the window
        let mut x = col;
        let mut start_x: Option<i32> = None;
        let mut visible = String::new();
        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0) as i32;
            if x >= win_width {
                break;
            }
            if x >= 0 && x + w <= win_width {
                if start_x.is_none() {
                    start_x = Some(x);
                }
                visible.push(ch);
            }
            x += w;
        }

        if let Some(start) = start_x {
            let mut out = io::stdout();
            queue!(
                out,
                MoveTo(self.rect.col + start as u16, abs_row),
                Print(&visible)
            )?;
        }
        Ok(())
    }

    fn draw_border(&mut self, chars: &BorderChars) -> Result<()> {
        let Rect {
            col,
            row,
            width,
            height,
        } = self.rect;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let edge = if width == 1 {
            chars.corner.to_string()
        } else {
            let mut line = String::with_capacity(width as usize);
            line.push(chars.corner);
            for _ in 0..width - 2 {
                line.push(chars.horizontal);
            }
            line.push(chars.corner);
            line
        };

        let mut out = io::stdout();
        queue!(out, MoveTo(col, row), Print(&edge))?;
        if height > 1 {
            queue!(out, MoveTo(col, row + height - 1), Print(&edge))?;
        }
        for r in 1..height.saturating_sub(1) {
            queue!(out, MoveTo(col, row + r), Print(chars.vertical))?;
            if width > 1 {
                queue!(out, MoveTo(col + width - 1, row + r), Print(chars.vertical))?;
            }
        }
        Ok(())
    }

    fn carve(&self, height: u16, width: u16, row: u16, col: u16) -> Result<Box<dyn Surface>> {
        let child = sub_rect(&self.rect, height, width, row, col)?;
        Ok(Box::new(CrosstermSurface { rect: child }))
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

/// Resolve a relative carve request against `parent`, rejecting regions
/// that overflow or escape the parent bounds.
pub(crate) fn sub_rect(
    parent: &Rect,
    height: u16,
    width: u16,
    row: u16,
    col: u16,
) -> Result<Rect> {
    let (Some(abs_col), Some(abs_row)) = (parent.col.checked_add(col), parent.row.checked_add(row))
    else {
        return Err(crate::error::Error::WindowCreationFailed);
    };
    let child = Rect::new(abs_col, abs_row, width, height);
    if !parent.contains(&child) {
        return Err(crate::error::Error::WindowCreationFailed);
    }
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_sub_rect_geometry() {
        let parent = Rect::new(2, 1, 40, 20);

        let child = sub_rect(&parent, 10, 20, 5, 5).unwrap();
        assert_eq!(child, Rect::new(7, 6, 20, 10));

        // full-size carve is allowed
        let child = sub_rect(&parent, 20, 40, 0, 0).unwrap();
        assert_eq!(child, parent);

        // out of bounds and degenerate requests are rejected
        assert!(matches!(
            sub_rect(&parent, 10, 41, 0, 0),
            Err(Error::WindowCreationFailed)
        ));
        assert!(matches!(
            sub_rect(&parent, 21, 10, 0, 0),
            Err(Error::WindowCreationFailed)
        ));
        assert!(matches!(
            sub_rect(&parent, 10, 10, 15, 0),
            Err(Error::WindowCreationFailed)
        ));
        assert!(matches!(
            sub_rect(&parent, 0, 10, 0, 0),
            Err(Error::WindowCreationFailed)
        ));
        assert!(matches!(
            sub_rect(&parent, 10, 10, u16::MAX, u16::MAX),
            Err(Error::WindowCreationFailed)
        ));
    }
}
