//! Minimal embeddable command interpreter.
//!
//! Commands are registered by name and evaluated against a word vector,
//! Tcl style: the first word names the command, the rest are its
//! arguments. The window package binds handles as commands in this table,
//! so removing a handle's table entry is exactly the handle's teardown
//! from the script's point of view.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::error::{Error, Result};
use crate::win::Session;

/// Shared context passed to every command invocation.
///
/// The terminal session is owned by the embedding application and handed
/// in by reference; there is no global session state.
pub struct Environment<'a> {
    pub session: &'a mut Session,
}

/// A single named command.
pub trait Command {
    /// Execute the command. `argv[0]` is the name it was invoked under.
    fn execute(
        &self,
        interp: &mut Interp,
        env: &mut Environment<'_>,
        argv: &[String],
    ) -> Result<String>;
}

/// Adapter turning a closure into a [`Command`]. Useful for registering
/// extension methods from the embedding application.
pub struct FnCommand<F>(pub F);

impl<F> Command for FnCommand<F>
where
    F: Fn(&mut Interp, &mut Environment<'_>, &[String]) -> Result<String>,
{
    fn execute(
        &self,
        interp: &mut Interp,
        env: &mut Environment<'_>,
        argv: &[String],
    ) -> Result<String> {
        (self.0)(interp, env, argv)
    }
}

/// Registered-command table with evaluation.
#[derive(Default)]
pub struct Interp {
    commands: HashMap<String, Rc<dyn Command>>,
}

impl Interp {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command, replacing any existing one with the same name.
    pub fn register(&mut self, name: &str, cmd: Rc<dyn Command>) {
        self.commands.insert(name.to_string(), cmd);
    }

    /// Remove a command. Removing an unknown name is a no-op.
    pub fn unregister(&mut self, name: &str) {
        self.commands.remove(name);
    }

    /// Whether a command with this name is registered.
    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Evaluate one word vector. An empty vector evaluates to the empty
    /// result; an unknown first word fails with `UnknownCommand`.
    pub fn eval(&mut self, env: &mut Environment<'_>, argv: &[String]) -> Result<String> {
        let Some(name) = argv.first() else {
            return Ok(String::new());
        };
        let cmd = self
            .commands
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCommand(name.clone()))?;
        trace!(command = %name, argc = argv.len(), "eval");
        cmd.execute(self, env, argv)
    }
}

/// Split a command line into words.
///
/// Double quotes group words (and make an empty word expressible); `#` as
/// the first non-blank character marks a comment line. Unterminated quotes
/// run to the end of the line.
pub fn split_words(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Vec::new();
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;
    for ch in trimmed.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    words.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::MockScreen;

    fn with_env<R>(f: impl FnOnce(&mut Interp, &mut Environment<'_>) -> R) -> R {
        let mut interp = Interp::new();
        let mut session = Session::new(Box::new(MockScreen::new(80, 24)));
        let mut env = Environment {
            session: &mut session,
        };
        f(&mut interp, &mut env)
    }

    #[test]
    fn test_unknown_command() {
        with_env(|interp, env| {
            let err = interp.eval(env, &["nope".to_string()]).unwrap_err();
            assert!(matches!(err, Error::UnknownCommand(name) if name == "nope"));
        });
    }

    #[test]
    fn test_register_and_eval() {
        with_env(|interp, env| {
            interp.register(
                "greet",
                Rc::new(FnCommand(
                    |_: &mut Interp, _: &mut Environment<'_>, argv: &[String]| -> Result<String> {
                        Ok(format!("hello {}", argv[1]))
                    },
                )),
            );
            assert!(interp.has_command("greet"));

            let argv = vec!["greet".to_string(), "world".to_string()];
            assert_eq!(interp.eval(env, &argv).unwrap(), "hello world");

            interp.unregister("greet");
            assert!(!interp.has_command("greet"));
            assert!(interp.eval(env, &argv).is_err());
        });
    }

    #[test]
    fn test_empty_vector() {
        with_env(|interp, env| {
            assert_eq!(interp.eval(env, &[]).unwrap(), "");
        });
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("a b  c"), vec!["a", "b", "c"]);
        assert_eq!(
            split_words(r#"w mvaddstr 1 2 "hello world""#),
            vec!["w", "mvaddstr", "1", "2", "hello world"]
        );
        assert_eq!(split_words(r#"cmd """#), vec!["cmd", ""]);
        assert_eq!(split_words("  # a comment"), Vec::<String>::new());
        assert_eq!(split_words("   "), Vec::<String>::new());
        // unterminated quote runs to end of line
        assert_eq!(split_words(r#"cmd "a b"#), vec!["cmd", "a b"]);
    }
}
