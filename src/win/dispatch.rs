//! Per-handle method dispatch.
//!
//! Every window handle is bound in the interpreter to [`WindowCommand`],
//! which routes `<handle> <method> ?args?` invocations: the method name is
//! matched exactly and case-sensitively against the built-in table, and
//! anything else is delegated to an extension command named
//! `curses.window::<method>` with the handle prepended to its arguments.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::interp::{Command, Environment, Interp};

use super::handle::EXTENSION_PREFIX;
use super::session::Session;

/// Built-in window methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Refresh,
    MvAddStr,
    DrawBox,
    Window,
    GetMaxYx,
    Getch,
    Destroy,
}

impl Method {
    /// Exact, case-sensitive lookup. `None` routes to extension delegation.
    fn lookup(name: &str) -> Option<Method> {
        Some(match name {
            "refresh" => Method::Refresh,
            "mvaddstr" => Method::MvAddStr,
            "box" => Method::DrawBox,
            "window" => Method::Window,
            "getmaxyx" => Method::GetMaxYx,
            "getch" => Method::Getch,
            "destroy" => Method::Destroy,
            _ => return None,
        })
    }
}

/// Interpreter command bound to one window handle. The handle's own name
/// arrives as `argv[0]`, so one stateless instance serves every handle.
pub struct WindowCommand;

impl Command for WindowCommand {
    fn execute(
        &self,
        interp: &mut Interp,
        env: &mut Environment<'_>,
        argv: &[String],
    ) -> Result<String> {
        dispatch(interp, env, argv)
    }
}

/// Route one `<handle> <method> ?args?` invocation.
pub fn dispatch(interp: &mut Interp, env: &mut Environment<'_>, argv: &[String]) -> Result<String> {
    if argv.len() < 2 {
        return Err(Error::WrongArgCount {
            usage: format!("{} method ?args ...?", argv.first().map_or("window", String::as_str)),
        });
    }
    let handle = &argv[0];

    let Some(method) = Method::lookup(&argv[1]) else {
        return delegate(interp, env, argv);
    };

    // the handle must name a live window before any method body runs
    if !env.session.registry().contains(handle) {
        return Err(Error::HandleNotFound(handle.clone()));
    }

    let args = &argv[2..];
    match method {
        Method::Refresh => {
            env.session.surface_mut(handle)?.flush()?;
            Ok(String::new())
        }
        Method::DrawBox => {
            let chars = env.session.border_chars();
            env.session.surface_mut(handle)?.draw_border(&chars)?;
            Ok(String::new())
        }
        Method::MvAddStr => mvaddstr(env.session, handle, args),
        Method::GetMaxYx => {
            if !args.is_empty() {
                return Err(Error::WrongArgCount {
                    usage: format!("{handle} getmaxyx"),
                });
            }
            let rect = env.session.surface_mut(handle)?.rect();
            // pinned order: width (columns) first, then height (rows)
            Ok(format!("{} {}", rect.width, rect.height))
        }
        Method::Window => make_window(interp, env.session, handle, args),
        Method::Getch => {
            if !args.is_empty() {
                return Err(Error::WrongArgCount {
                    usage: format!("{handle} getch"),
                });
            }
            let key = env.session.read_key()?;
            Ok(key.token())
        }
        Method::Destroy => {
            if !args.is_empty() {
                return Err(Error::WrongArgCount {
                    usage: format!("{handle} destroy"),
                });
            }
            env.session.destroy_handle(interp, handle)?;
            Ok(String::new())
        }
    }
}

/// `mvaddstr row col string` - write text and flush; the written text
/// round-trips as the result.
fn mvaddstr(session: &mut Session, handle: &str, args: &[String]) -> Result<String> {
    if args.len() != 3 {
        return Err(Error::WrongArgCount {
            usage: format!("{handle} mvaddstr row col string"),
        });
    }
    let row = parse_int(&args[0], "row")?;
    let col = parse_int(&args[1], "col")?;
    let text = &args[2];

    session.surface_mut(handle)?.put_text(row, col, text)?;
    session.surface_mut(handle)?.flush()?;
    session.force_refresh()?;
    Ok(text.clone())
}

/// `window height width row column` - carve a sub-region, register it, and
/// bind its handle command. Nothing is registered when the carve fails.
fn make_window(
    interp: &mut Interp,
    session: &mut Session,
    handle: &str,
    args: &[String],
) -> Result<String> {
    if args.len() != 4 {
        return Err(Error::WrongArgCount {
            usage: format!("{handle} window height width row column"),
        });
    }

    let names = ["height", "width", "row", "column"];
    let mut dims = [0i64; 4];
    for (i, arg) in args.iter().enumerate() {
        dims[i] = arg.parse().map_err(|_| Error::TypeMismatch {
            name: names[i].to_string(),
            value: arg.clone(),
        })?;
    }
    let clamp = |v: i64| u16::try_from(v).map_err(|_| Error::WindowCreationFailed);
    let (height, width) = (clamp(dims[0])?, clamp(dims[1])?);
    let (row, col) = (clamp(dims[2])?, clamp(dims[3])?);

    let sub = session.carve(handle, height, width, row, col)?;
    let id = session.register_child(handle, sub)?;
    interp.register(&id, Rc::new(WindowCommand));
    debug!(parent = %handle, child = %id, "created sub-window");
    Ok(id)
}

/// Rewrite `<handle> <method> args...` into
/// `curses.window::<method> <handle> args...` and evaluate it. An
/// unresolved extension surfaces the interpreter's own lookup failure
/// unchanged.
fn delegate(interp: &mut Interp, env: &mut Environment<'_>, argv: &[String]) -> Result<String> {
    let mut forwarded = Vec::with_capacity(argv.len() + 1);
    forwarded.push(format!("{}{}", EXTENSION_PREFIX, argv[1]));
    forwarded.push(argv[0].clone());
    forwarded.extend_from_slice(&argv[2..]);
    trace!(target_cmd = %forwarded[0], "delegating to extension method");
    interp.eval(env, &forwarded)
}

fn parse_int(value: &str, name: &str) -> Result<i32> {
    value.parse().map_err(|_| Error::TypeMismatch {
        name: name.to_string(),
        value: value.to_string(),
    })
}
