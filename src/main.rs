//! curscript - run scripts against the terminal window package.
//!
//! ```text
//! curscript demo.cw     # run a script file
//! curscript             # read command lines from stdin
//! ```
//!
//! Script lines are word vectors: the first word names a command, double
//! quotes group words, and `#` starts a comment line. Window identifiers
//! are deterministic (`curses.window<0>`, `curses.window<1>`, ...) so a
//! script can name the windows it creates:
//!
//! ```text
//! curses.init
//! curses.stdscr window 10 40 2 2
//! curses.window<0> box
//! curses.window<0> mvaddstr 1 2 "hello"
//! curses.window<0> getch
//! curses.end
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use curscript::config::Config;
use curscript::interp::{split_words, Environment, Interp};
use curscript::term::CrosstermScreen;
use curscript::win::{register_package, Session};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("curscript {}", VERSION);
}

fn print_help() {
    eprintln!("curscript {} - terminal windows as script commands", VERSION);
    eprintln!();
    eprintln!("Usage: curscript [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("With no SCRIPT, command lines are read from stdin and");
    eprintln!("results are written to stderr.");
}

fn main() -> anyhow::Result<()> {
    let mut script: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                print_help();
                std::process::exit(2);
            }
            other => script = Some(other.to_string()),
        }
    }

    let config = Config::load();
    init_logging(&config);

    let mut interp = Interp::new();
    register_package(&mut interp);
    let mut session = Session::with_config(Box::new(CrosstermScreen::new()), &config);

    let result = match script {
        Some(path) => run_script(&mut interp, &mut session, &path),
        None => run_repl(&mut interp, &mut session),
    };

    // never leave the terminal raw, whatever happened above
    let mut env = Environment {
        session: &mut session,
    };
    let _ = interp.eval(&mut env, &["curses.end".to_string()]);

    result
}

/// Send log output to a file: the process owns the terminal screen.
fn init_logging(config: &Config) {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    let _ = fs::create_dir_all(&dir);
    let Ok(file) = fs::File::create(dir.join("curscript.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run_script(interp: &mut Interp, session: &mut Session, path: &str) -> anyhow::Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read script {}", path))?;
    info!(script = %path, "running script");

    for (idx, line) in source.lines().enumerate() {
        let words = split_words(line);
        if words.is_empty() {
            continue;
        }
        let mut env = Environment {
            session: &mut *session,
        };
        if let Err(err) = interp.eval(&mut env, &words) {
            error!(line = idx + 1, %err, "script failed");
            return Err(anyhow::anyhow!("line {}: {}", idx + 1, err));
        }
    }
    Ok(())
}

fn run_repl(interp: &mut Interp, session: &mut Session) -> anyhow::Result<()> {
    info!("reading commands from stdin");
    let stdin = io::stdin();
    let mut out = io::stderr();

    loop {
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words = split_words(&line);
        if words.is_empty() {
            continue;
        }
        let mut env = Environment {
            session: &mut *session,
        };
        match interp.eval(&mut env, &words) {
            Ok(result) => {
                if !result.is_empty() {
                    let _ = writeln!(out, "{}", result);
                }
            }
            Err(err) => {
                let _ = writeln!(out, "error: {}", err);
            }
        }
    }
    Ok(())
}
