//! In-memory backend for tests and headless embedding.
//!
//! Records drawing and lifecycle operations instead of touching a real
//! terminal, and serves input events from a scripted queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::config::BorderChars;
use crate::error::{Error, Result};

use super::backend::{Rect, Screen, Surface};
use super::crossterm::sub_rect;
use super::input::Key;

/// Shared recorder of backend activity.
#[derive(Debug, Default)]
pub struct MockLog {
    /// Operations in call order, one line each.
    pub ops: Vec<String>,
    /// Number of surfaces released so far.
    pub released: usize,
}

impl MockLog {
    /// Whether any recorded operation contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.ops.iter().any(|op| op.contains(needle))
    }
}

/// Scripted whole-terminal screen.
pub struct MockScreen {
    size: (u16, u16),
    log: Rc<RefCell<MockLog>>,
    input: Rc<RefCell<VecDeque<Key>>>,
}

impl MockScreen {
    /// Create a screen of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: (cols, rows),
            log: Rc::new(RefCell::new(MockLog::default())),
            input: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Handle to the operation log; keep a clone before boxing the screen.
    pub fn log(&self) -> Rc<RefCell<MockLog>> {
        self.log.clone()
    }

    /// Handle to the input queue; keep a clone before boxing the screen.
    pub fn input(&self) -> Rc<RefCell<VecDeque<Key>>> {
        self.input.clone()
    }

    /// Queue one input event for a later `getch`.
    pub fn push_key(&self, key: Key) {
        self.input.borrow_mut().push_back(key);
    }
}

impl Screen for MockScreen {
    fn enter(&mut self) -> Result<()> {
        self.log.borrow_mut().ops.push("enter".to_string());
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.log.borrow_mut().ops.push("leave".to_string());
        Ok(())
    }

    fn root_surface(&mut self) -> Result<Box<dyn Surface>> {
        Ok(Box::new(MockSurface {
            rect: Rect::new(0, 0, self.size.0, self.size.1),
            log: self.log.clone(),
        }))
    }

    fn read_key(&mut self) -> Result<Key> {
        self.input.borrow_mut().pop_front().ok_or_else(|| {
            Error::Terminal(io::Error::new(
                io::ErrorKind::WouldBlock,
                "no scripted input",
            ))
        })
    }

    fn refresh_all(&mut self) -> Result<()> {
        self.log.borrow_mut().ops.push("refresh_all".to_string());
        Ok(())
    }
}

/// One recorded window region.
pub struct MockSurface {
    rect: Rect,
    log: Rc<RefCell<MockLog>>,
}

impl Surface for MockSurface {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn put_text(&mut self, row: i32, col: i32, text: &str) -> Result<()> {
        self.log
            .borrow_mut()
            .ops
            .push(format!("put {:?} {} {} {:?}", self.rect, row, col, text));
        Ok(())
    }

    fn draw_border(&mut self, chars: &BorderChars) -> Result<()> {
        self.log.borrow_mut().ops.push(format!(
            "border {:?} {}{}{}",
            self.rect, chars.corner, chars.horizontal, chars.vertical
        ));
        Ok(())
    }

    fn carve(&self, height: u16, width: u16, row: u16, col: u16) -> Result<Box<dyn Surface>> {
        let child = sub_rect(&self.rect, height, width, row, col)?;
        self.log
            .borrow_mut()
            .ops
            .push(format!("carve {:?} -> {:?}", self.rect, child));
        Ok(Box::new(MockSurface {
            rect: child,
            log: self.log.clone(),
        }))
    }

    fn flush(&mut self) -> Result<()> {
        self.log
            .borrow_mut()
            .ops
            .push(format!("flush {:?}", self.rect));
        Ok(())
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.released += 1;
        log.ops.push(format!("release {:?}", self.rect));
    }
}
