//! Handle identifier allocation and the fixed handle namespace.

/// Namespace prefix for allocated window handles.
pub const HANDLE_PREFIX: &str = "curses.window";

/// Fixed name of the root handle bound to the whole screen.
pub const ROOT_HANDLE: &str = "curses.stdscr";

/// Prefix under which unrecognized methods are resolved as extension
/// commands, e.g. `curses.window::highlight`.
pub const EXTENSION_PREFIX: &str = "curses.window::";

/// Allocates process-unique window handle identifiers.
///
/// Identifiers are `curses.window<N>` with a strictly increasing counter.
/// A counter value is never reused, even after the handle it named is
/// destroyed, so a given call sequence always produces the same
/// identifiers.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Produce the next identifier.
    pub fn next(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("{}<{}>", HANDLE_PREFIX, id)
    }
}
