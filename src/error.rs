//! Error taxonomy for the window command protocol.
//!
//! Every validation failure is reported at the offending call and carries
//! the text a script needs to branch on. There are no retries anywhere:
//! each operation either completes immediately or is a single blocking read.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("wrong # args: should be \"{usage}\"")]
    WrongArgCount { usage: String },

    #[error("expected an integer for {name} but got \"{value}\"")]
    TypeMismatch { name: String, value: String },

    #[error("window \"{0}\" is null")]
    HandleNotFound(String),

    #[error("failed to create window - possibly dimensions out of range?")]
    WindowCreationFailed,

    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("duplicate handle \"{0}\"")]
    DuplicateHandle(String),

    #[error("{command} is deprecated: {hint}")]
    Deprecated { command: String, hint: String },

    #[error("no active session - call curses.init first")]
    SessionInactive,

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
