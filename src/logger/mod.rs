//! Top-level logger exports and the process-wide facade.
//!
//! - `Logger`: gated writer over an `OutputSink`
//! - `LogLevel`: the level table, with `parse` for name lookup
//! - `LoggerState`: the mutable threshold
//! - `StdSink`: stdout for lines, stderr for fatal diagnostics
//!
//! The free functions below act on a single logger bound to the standard
//! streams, created on first use with an INFO threshold.
//!
//! ```rust,no_run
//! use dutil::{log_it, logger};
//!
//! logger::set_threshold("debug");
//! log_it!("INFO", "listening on", 5222);
//! logger::emit_lazy("DEBUG", || vec![1, 2, 3]);
//! ```

pub mod core;
pub mod logger;
pub mod sink;

use std::sync::LazyLock;

pub use self::core::{parse, LogLevel, LoggerState, UNREPRESENTABLE_RANK};
pub use self::logger::{
    default_timestamp, Clock, EmitFailure, IntoLogArgs, LogArgs, Logger, Stringify,
    StringifyError, FATAL_EXIT_CODE, MAX_CHARS_PER_ARG,
};
pub use self::sink::{OutputSink, StdSink};

static GLOBAL_LOGGER: LazyLock<Logger<StdSink>> = LazyLock::new(Logger::stdio);

/// The process-wide logger.
pub fn global() -> &'static Logger<StdSink> {
    &GLOBAL_LOGGER
}

pub fn set_threshold(name: &str) {
    global().set_threshold(name);
}

pub fn threshold() -> u8 {
    global().threshold()
}

pub fn enabled(level: &str) -> bool {
    global().enabled(level)
}

/// Log through the global logger. See [`Logger::emit`].
pub fn emit(level: &str, args: &[&dyn Stringify]) {
    global().emit(level, args);
}

/// Log through the global logger, building the arguments only if the level
/// passes. See [`Logger::emit_lazy`].
pub fn emit_lazy<'a, F, R>(level: &str, build: F)
where
    F: FnOnce() -> R,
    R: IntoLogArgs<'a>,
{
    global().emit_lazy(level, build);
}

pub fn fatal(args: &[&dyn Stringify]) {
    global().fatal(args);
}

pub fn error(args: &[&dyn Stringify]) {
    global().error(args);
}

pub fn warn(args: &[&dyn Stringify]) {
    global().warn(args);
}

pub fn info(args: &[&dyn Stringify]) {
    global().info(args);
}

pub fn debug(args: &[&dyn Stringify]) {
    global().debug(args);
}

/// Log any number of `Display` values at a named level.
///
/// `log_it!("WARN", "disk", path, "is", pct, "% full")`
#[macro_export]
macro_rules! log_it {
    ($level:expr $(, $arg:expr)* $(,)?) => {
        $crate::logger::emit(
            $level,
            &[$(&$arg as &dyn $crate::logger::Stringify),*],
        )
    };
}

/// Build a [`LogArgs`] of mixed types, for returning from a lazy callback.
#[macro_export]
macro_rules! log_args {
    ($($arg:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut args = $crate::logger::LogArgs::new();
        $(args.push($arg);)*
        args
    }};
}
