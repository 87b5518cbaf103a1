//! curscript - terminal windows as first-class script commands.
//!
//! curscript exposes curses-style terminal primitives (window creation,
//! drawing, input, refresh) as dynamically created, named commands inside
//! a small embeddable interpreter. Each window is an independently
//! addressable handle with a uniform method-call protocol and
//! deterministic teardown tied to the handle's lifetime.
//!
//! # Script surface
//!
//! ```text
//! curses.init
//! curses.stdscr box
//! curses.stdscr mvaddstr 1 2 "hello"
//! curses.stdscr window 10 40 2 2      # prints curses.window<0>
//! curses.window<0> box
//! curses.window<0> getch
//! curses.end
//! ```
//!
//! Methods a window does not recognize are delegated to extension
//! commands: `$win highlight a b` evaluates `curses.window::highlight
//! $win a b`, so embedders can add window methods by registering commands
//! under the `curses.window::` prefix.
//!
//! # Embedding
//!
//! The embedding application owns an [`Interp`] (the command table) and a
//! [`Session`] (the terminal state) and passes both into every
//! evaluation. [`win::register_package`] binds the `curses.*` commands;
//! [`term::CrosstermScreen`] is the production backend and
//! [`term::MockScreen`] a scriptable in-memory one.

pub mod config;
pub mod error;
pub mod interp;
pub mod term;
pub mod win;

pub use config::Config;
pub use error::{Error, Result};
pub use interp::{split_words, Command, Environment, FnCommand, Interp};
pub use win::{register_package, Session};
