//! Session lifecycle: raw-mode terminal ownership and the root handle.
//!
//! A [`Session`] is an explicit value owned by the embedding application
//! and passed into every command invocation; nothing about the terminal
//! state is global. The root handle's lifetime is the session's: starting
//! the session registers `curses.stdscr`, ending it tears down every
//! registered handle and restores the terminal.

use tracing::info;

use crate::config::{BorderChars, Config};
use crate::error::{Error, Result};
use crate::interp::Interp;
use crate::term::{Key, Screen, Surface};

use super::handle::{HandleAllocator, ROOT_HANDLE};
use super::registry::WindowRegistry;

/// Terminal session: backend screen, window registry, and identifier
/// allocator. Starts inactive.
pub struct Session {
    screen: Box<dyn Screen>,
    registry: WindowRegistry,
    allocator: HandleAllocator,
    border: BorderChars,
    active: bool,
}

impl Session {
    /// Create an inactive session on the given backend.
    pub fn new(screen: Box<dyn Screen>) -> Self {
        Self {
            screen,
            registry: WindowRegistry::new(),
            allocator: HandleAllocator::new(),
            border: BorderChars::default(),
            active: false,
        }
    }

    /// Create a session with border characters from the configuration.
    pub fn with_config(screen: Box<dyn Screen>, config: &Config) -> Self {
        let mut session = Self::new(screen);
        session.border = config.border;
        session
    }

    /// Whether the terminal is currently in raw full-screen mode.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The registry of live handles.
    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub(crate) fn border_chars(&self) -> BorderChars {
        self.border
    }

    /// Enter raw mode and register the root handle. Calling on an active
    /// session is a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        self.screen.enter()?;
        let root = match self.screen.root_surface() {
            Ok(root) => root,
            Err(err) => {
                // never leave the terminal raw on a failed start
                let _ = self.screen.leave();
                return Err(err);
            }
        };
        self.registry.register(ROOT_HANDLE, root, None)?;
        self.active = true;
        info!("session started");
        Ok(())
    }

    /// Tear down every handle, unbind their commands, and restore the
    /// terminal. Idempotent. The root handle's command binding stays in
    /// the interpreter so a stale root call reports `HandleNotFound`
    /// rather than an unknown command.
    pub fn end(&mut self, interp: &mut Interp) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        for id in self.registry.destroy_all() {
            if id != ROOT_HANDLE {
                interp.unregister(&id);
            }
        }
        self.active = false;
        self.screen.leave()?;
        info!("session ended");
        Ok(())
    }

    /// Destroy one handle and its descendants, unbinding their commands.
    /// The root handle's lifetime is the session's, so destroying the
    /// root ends the session.
    pub fn destroy_handle(&mut self, interp: &mut Interp, id: &str) -> Result<()> {
        if id == ROOT_HANDLE {
            return self.end(interp);
        }
        for removed in self.registry.destroy(id) {
            interp.unregister(&removed);
        }
        Ok(())
    }

    /// Borrow the live surface for a handle.
    pub(crate) fn surface_mut(&mut self, id: &str) -> Result<&mut dyn Surface> {
        self.registry.resolve_mut(id)
    }

    /// Carve a sub-surface from a registered parent.
    pub(crate) fn carve(
        &mut self,
        parent: &str,
        height: u16,
        width: u16,
        row: u16,
        col: u16,
    ) -> Result<Box<dyn Surface>> {
        self.registry.resolve_mut(parent)?.carve(height, width, row, col)
    }

    /// Allocate an identifier and register `surface` as a child of
    /// `parent`.
    pub(crate) fn register_child(
        &mut self,
        parent: &str,
        surface: Box<dyn Surface>,
    ) -> Result<String> {
        let id = self.allocator.next();
        self.registry.register(&id, surface, Some(parent))?;
        Ok(id)
    }

    /// Block until one input event arrives.
    pub(crate) fn read_key(&mut self) -> Result<Key> {
        self.ensure_active()?;
        self.screen.read_key()
    }

    /// Redraw the whole physical screen, independent of any window.
    pub fn force_refresh(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.screen.refresh_all()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.active {
            Ok(())
        } else {
            Err(Error::SessionInactive)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::interp::{split_words, Environment};
    use crate::term::mock::MockLog;
    use crate::term::MockScreen;
    use crate::win::commands::register_package;

    fn setup() -> (Interp, Session, Rc<RefCell<MockLog>>) {
        let screen = MockScreen::new(80, 24);
        let log = screen.log();
        let mut interp = Interp::new();
        register_package(&mut interp);
        let session = Session::new(Box::new(screen));
        (interp, session, log)
    }

    fn eval(interp: &mut Interp, session: &mut Session, line: &str) -> Result<String> {
        let mut env = Environment { session };
        interp.eval(&mut env, &split_words(line))
    }

    #[test]
    fn test_start_is_idempotent() {
        let (_interp, mut session, log) = setup();

        assert!(!session.is_active());
        session.start().unwrap();
        assert!(session.is_active());
        assert!(session.registry().contains(ROOT_HANDLE));

        session.start().unwrap();
        let enters = log
            .borrow()
            .ops
            .iter()
            .filter(|op| op.as_str() == "enter")
            .count();
        assert_eq!(enters, 1);
    }

    #[test]
    fn test_end_is_idempotent_and_releases_everything() {
        let (mut interp, mut session, log) = setup();
        session.start().unwrap();

        eval(&mut interp, &mut session, "curses.stdscr window 10 40 0 0").unwrap();
        eval(&mut interp, &mut session, "curses.window<0> window 4 20 1 1").unwrap();
        assert_eq!(session.registry().len(), 3);

        session.end(&mut interp).unwrap();
        assert!(!session.is_active());
        assert!(session.registry().is_empty());
        assert_eq!(log.borrow().released, 3);
        assert!(!interp.has_command("curses.window<0>"));
        assert!(!interp.has_command("curses.window<1>"));
        // the root command stays bound so stale calls report a null window
        assert!(interp.has_command(ROOT_HANDLE));

        session.end(&mut interp).unwrap();
        assert_eq!(log.borrow().released, 3);
    }

    #[test]
    fn test_operations_require_active_session() {
        let (_interp, mut session, _log) = setup();

        assert!(matches!(
            session.force_refresh().unwrap_err(),
            Error::SessionInactive
        ));
        assert!(matches!(
            session.read_key().unwrap_err(),
            Error::SessionInactive
        ));
        assert!(matches!(
            session.surface_mut(ROOT_HANDLE).err().unwrap(),
            Error::HandleNotFound(_)
        ));
    }

    #[test]
    fn test_restart_after_end() {
        let (mut interp, mut session, _log) = setup();
        session.start().unwrap();
        eval(&mut interp, &mut session, "curses.stdscr window 10 40 0 0").unwrap();
        session.end(&mut interp).unwrap();

        session.start().unwrap();
        assert!(session.is_active());
        assert!(session.registry().contains(ROOT_HANDLE));

        // the allocator does not reset: old identifiers are never reissued
        let id = eval(&mut interp, &mut session, "curses.stdscr window 10 40 0 0").unwrap();
        assert_eq!(id, "curses.window<1>");
    }

    #[test]
    fn test_full_package_lifecycle() {
        let (mut interp, mut session, log) = setup();

        assert_eq!(eval(&mut interp, &mut session, "curses.isInitialized").unwrap(), "0");
        eval(&mut interp, &mut session, "curses.init").unwrap();
        assert_eq!(eval(&mut interp, &mut session, "curses.isInitialized").unwrap(), "1");

        eval(&mut interp, &mut session, "curses.stdscr box").unwrap();
        let id = eval(&mut interp, &mut session, "curses.stdscr window 10 40 2 2").unwrap();
        assert_eq!(
            eval(&mut interp, &mut session, &format!("{id} mvaddstr 1 1 hi")).unwrap(),
            "hi"
        );
        eval(&mut interp, &mut session, "curses.refresh").unwrap();

        eval(&mut interp, &mut session, "curses.end").unwrap();
        assert_eq!(eval(&mut interp, &mut session, "curses.isInitialized").unwrap(), "0");
        assert!(log.borrow().contains("leave"));

        // per-handle calls on the destroyed root now fail handle lookup
        let err = eval(&mut interp, &mut session, "curses.stdscr getmaxyx").unwrap_err();
        assert!(matches!(err, Error::HandleNotFound(_)));
    }
}
