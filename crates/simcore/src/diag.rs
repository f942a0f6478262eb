//! Verbosity-gated textual diagnostics.
//!
//! Converted from the teacher's `common.rs`: `com_printf`/`com_dprintf`/
//! `com_error` are plain functions over `println!`/`eprintln!`, gated
//! by a verbosity cvar checked before any formatting happens. No
//! logging crate is introduced — same shape, `AtomicU8` standing in
//! for the teacher's cvar.

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Level {
    fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Level::Info as u8);

pub fn set_verbosity(level: Level) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

pub fn verbosity() -> Level {
    Level::from_u8(VERBOSITY.load(Ordering::Relaxed))
}

/// Formats and prints `msg` if `level` is at or below the current
/// verbosity. Checks the atomic *before* formatting, so a filtered-out
/// line never allocates — the hot-path guarantee the ambient stack
/// section requires.
pub fn log(level: Level, module: &str, msg: std::fmt::Arguments) {
    if level as u8 > verbosity() as u8 {
        return;
    }
    if level == Level::Error {
        eprintln!("[{module}] {msg}");
    } else {
        println!("[{module}] {msg}");
    }
}

/// Something that can receive diagnostic lines. `Sim` is constructed
/// with one of these (default: [`StdoutLogger`]) rather than calling
/// [`log`] directly, so a host can redirect diagnostics without this
/// crate depending on a logging façade crate.
pub trait Logger {
    fn log(&self, level: Level, module: &str, msg: std::fmt::Arguments);
}

/// The default logger: delegates straight to [`log`].
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, level: Level, module: &str, msg: std::fmt::Arguments) {
        log(level, module, msg);
    }
}

/// Formats `$($arg)*` and routes it through a [`Logger`] at `$level`,
/// tagged with the calling module's path.
#[macro_export]
macro_rules! diag_log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log($level, module_path!(), format_args!($($arg)*));
    };
}
