//! Static package commands bound at registration time.
//!
//! `register_package` installs the session-level entry points plus the
//! root handle command. Window handles created at runtime are bound by
//! the dispatcher as they are allocated.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::interp::{Command, Environment, Interp};

use super::dispatch::WindowCommand;
use super::handle::ROOT_HANDLE;

/// Bind the package's commands into the interpreter.
pub fn register_package(interp: &mut Interp) {
    interp.register("curses.init", Rc::new(InitCommand));
    interp.register("curses.isInitialized", Rc::new(IsInitializedCommand));
    interp.register("curses.end", Rc::new(EndCommand));
    interp.register("curses.refresh", Rc::new(RefreshCommand));
    interp.register("curses.getc", Rc::new(GetcCommand));
    // the root handle name is fixed, so its command binding is permanent;
    // dispatch reports a null window while no session is active
    interp.register(ROOT_HANDLE, Rc::new(WindowCommand));
}

/// `curses.init` - start the session and register the root handle.
struct InitCommand;

impl Command for InitCommand {
    fn execute(
        &self,
        _interp: &mut Interp,
        env: &mut Environment<'_>,
        _argv: &[String],
    ) -> Result<String> {
        env.session.start()?;
        Ok(String::new())
    }
}

/// `curses.isInitialized` - whether the terminal is in raw mode.
struct IsInitializedCommand;

impl Command for IsInitializedCommand {
    fn execute(
        &self,
        _interp: &mut Interp,
        env: &mut Environment<'_>,
        _argv: &[String],
    ) -> Result<String> {
        Ok(if env.session.is_active() { "1" } else { "0" }.to_string())
    }
}

/// `curses.end` - restore the terminal and tear down every handle.
struct EndCommand;

impl Command for EndCommand {
    fn execute(
        &self,
        interp: &mut Interp,
        env: &mut Environment<'_>,
        _argv: &[String],
    ) -> Result<String> {
        env.session.end(interp)?;
        Ok(String::new())
    }
}

/// `curses.refresh` - force a whole-screen redraw.
struct RefreshCommand;

impl Command for RefreshCommand {
    fn execute(
        &self,
        _interp: &mut Interp,
        env: &mut Environment<'_>,
        _argv: &[String],
    ) -> Result<String> {
        env.session.force_refresh()?;
        Ok(String::new())
    }
}

/// Rejected entry point: a screen-level read would compete with the
/// window `getch` method for the one input stream, so it fails instead
/// of consuming an event.
struct GetcCommand;

impl Command for GetcCommand {
    fn execute(
        &self,
        _interp: &mut Interp,
        _env: &mut Environment<'_>,
        _argv: &[String],
    ) -> Result<String> {
        Err(Error::Deprecated {
            command: "curses.getc".to_string(),
            hint: "read input through a window handle instead, e.g. \"curses.stdscr getch\""
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::split_words;
    use crate::term::MockScreen;
    use crate::win::Session;

    fn eval(interp: &mut Interp, session: &mut Session, line: &str) -> Result<String> {
        let mut env = Environment { session };
        interp.eval(&mut env, &split_words(line))
    }

    #[test]
    fn test_getc_is_rejected_without_consuming_input() {
        let screen = MockScreen::new(80, 24);
        let input = screen.input();
        screen.push_key(crate::term::Key::Char('q'));

        let mut interp = Interp::new();
        register_package(&mut interp);
        let mut session = Session::new(Box::new(screen));
        eval(&mut interp, &mut session, "curses.init").unwrap();

        let err = eval(&mut interp, &mut session, "curses.getc").unwrap_err();
        assert!(matches!(err, Error::Deprecated { .. }));
        assert!(err.to_string().contains("deprecated"));
        // the queued event is still there for a window getch
        assert_eq!(input.borrow().len(), 1);
    }

    #[test]
    fn test_refresh_requires_session() {
        let mut interp = Interp::new();
        register_package(&mut interp);
        let mut session = Session::new(Box::new(MockScreen::new(80, 24)));

        let err = eval(&mut interp, &mut session, "curses.refresh").unwrap_err();
        assert!(matches!(err, Error::SessionInactive));
    }
}
