//! The severity-gated logger.
//!
//! A [`Logger`] owns a [`LoggerState`] threshold and an [`OutputSink`]. Each
//! emitted line is `<LEVEL> <timestamp> <arg1> ... <argN>\n`, written one
//! argument at a time while the sink lock is held. Arguments longer than
//! [`MAX_CHARS_PER_ARG`] characters are cut and followed by a
//! ` ... <K> more characters` hint.
//!
//! If an argument cannot be rendered, or the sink rejects a write, the logger
//! has no trustworthy channel left to report through: it dumps what it knows
//! to the error stream and terminates the process with [`FATAL_EXIT_CODE`].

use std::backtrace::Backtrace;
use std::error::Error as _;
use std::fmt::{self, Write as _};
use std::io;
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use thiserror::Error;

use super::core::{parse, LoggerState};
use super::sink::{OutputSink, StdSink};

/// Longest rendering of a single argument, in characters.
pub const MAX_CHARS_PER_ARG: usize = 4096;

/// Process status used when the logger cannot render its own output.
pub const FATAL_EXIT_CODE: i32 = 3;

const DIAGNOSTIC_TAG: &str = "DUTIL";

/// A value whose `Display` implementation reported `fmt::Error`.
#[derive(Debug, Error)]
#[error("value failed to render after {partial_len} characters")]
pub struct StringifyError {
    /// Characters produced before the failure.
    pub partial_len: usize,
}

/// Anything that can appear on a log line.
///
/// Implemented for every `Display` type. Rendering goes through a fallible
/// `write!`, so a `Display` impl that returns `fmt::Error` surfaces as a
/// [`StringifyError`] instead of a panic.
pub trait Stringify {
    fn stringify(&self) -> Result<String, StringifyError>;

    /// Type of the value, for the fatal diagnostic dump.
    fn type_name(&self) -> &'static str;
}

impl<T: fmt::Display + ?Sized> Stringify for T {
    fn stringify(&self) -> Result<String, StringifyError> {
        let mut out = String::new();
        match write!(out, "{self}") {
            Ok(()) => Ok(out),
            Err(fmt::Error) => Err(StringifyError {
                partial_len: out.chars().count(),
            }),
        }
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Owned argument list produced by a lazy log callback.
#[derive(Default)]
pub struct LogArgs<'a>(Vec<Box<dyn Stringify + 'a>>);

impl<'a> LogArgs<'a> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn one<T: Stringify + 'a>(value: T) -> Self {
        let mut args = Self::new();
        args.push(value);
        args
    }

    pub fn push<T: Stringify + 'a>(&mut self, value: T) {
        self.0.push(Box::new(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_refs(&self) -> Vec<&dyn Stringify> {
        self.0.iter().map(|arg| &**arg as &dyn Stringify).collect()
    }
}

impl fmt::Debug for LogArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|arg| arg.type_name()))
            .finish()
    }
}

/// Result of a lazy log callback.
///
/// Sequences spread into separate arguments; any other value becomes the
/// single argument of the line. Types without an impl here can be returned
/// as [`LogArgs::one`].
pub trait IntoLogArgs<'a> {
    fn into_log_args(self) -> LogArgs<'a>;
}

impl<'a> IntoLogArgs<'a> for LogArgs<'a> {
    fn into_log_args(self) -> LogArgs<'a> {
        self
    }
}

impl<'a, T: Stringify + 'a> IntoLogArgs<'a> for Vec<T> {
    fn into_log_args(self) -> LogArgs<'a> {
        let mut args = LogArgs::new();
        for value in self {
            args.push(value);
        }
        args
    }
}

impl<'a, T: Stringify + 'a, const N: usize> IntoLogArgs<'a> for [T; N] {
    fn into_log_args(self) -> LogArgs<'a> {
        Vec::from(self).into_log_args()
    }
}

impl<'a> IntoLogArgs<'a> for &'a str {
    fn into_log_args(self) -> LogArgs<'a> {
        LogArgs::one(self)
    }
}

// A blanket impl over `Stringify` would overlap the sequence impls above.
macro_rules! single_log_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> IntoLogArgs<'a> for $ty {
                fn into_log_args(self) -> LogArgs<'a> {
                    LogArgs::one(self)
                }
            }
        )*
    };
}

single_log_arg!(
    String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Why a line could not be written. Only ever reported by the fatal path.
#[derive(Debug, Error)]
pub enum EmitFailure {
    #[error("argument #{index} could not be stringified")]
    Stringify {
        index: usize,
        #[source]
        source: StringifyError,
    },
    #[error("writing argument #{index} failed")]
    Write {
        index: usize,
        rendered_len: usize,
        #[source]
        source: io::Error,
    },
}

impl EmitFailure {
    pub fn index(&self) -> usize {
        match self {
            EmitFailure::Stringify { index, .. } | EmitFailure::Write { index, .. } => *index,
        }
    }

    /// Characters of the failing argument computed before the failure.
    pub fn partial_len(&self) -> usize {
        match self {
            EmitFailure::Stringify { source, .. } => source.partial_len,
            EmitFailure::Write { rendered_len, .. } => *rendered_len,
        }
    }
}

/// Produces the timestamp placed after the level name.
pub type Clock = fn() -> String;

/// Wall-clock time in a browser-style default date rendering,
/// e.g. `Sat Oct 17 2026 09:30:00 GMT+0200`.
pub fn default_timestamp() -> String {
    Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

/// Splits `text` at [`MAX_CHARS_PER_ARG`] characters. Returns the kept prefix
/// and, when something was dropped, the hint to write after it.
pub(crate) fn truncate(text: &str) -> (&str, Option<String>) {
    match text.char_indices().nth(MAX_CHARS_PER_ARG) {
        None => (text, None),
        Some((cut, _)) => {
            let dropped = text[cut..].chars().count();
            (
                &text[..cut],
                Some(format!(" ... {dropped} more characters")),
            )
        }
    }
}

pub struct Logger<S: OutputSink = StdSink> {
    state: LoggerState,
    sink: Mutex<S>,
    clock: Clock,
}

impl Logger<StdSink> {
    /// Logger writing to the process's standard streams.
    pub fn stdio() -> Self {
        Logger::new(StdSink)
    }
}

impl<S: OutputSink> Logger<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: LoggerState::new(),
            sink: Mutex::new(sink),
            clock: default_timestamp,
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &LoggerState {
        &self.state
    }

    pub fn set_threshold(&self, name: &str) {
        self.state.set_threshold(name);
    }

    pub fn threshold(&self) -> u8 {
        self.state.threshold()
    }

    /// Whether a line at `level` would currently be written.
    pub fn enabled(&self, level: &str) -> bool {
        self.state.allows(parse(level))
    }

    /// Write one line at `level` if the threshold allows it.
    pub fn emit(&self, level: &str, args: &[&dyn Stringify]) {
        if self.enabled(level) {
            self.write_record(level, args);
        }
    }

    /// Like [`emit`](Self::emit), but the arguments are only built once the
    /// level is known to pass the gate.
    pub fn emit_lazy<'a, F, R>(&self, level: &str, build: F)
    where
        F: FnOnce() -> R,
        R: IntoLogArgs<'a>,
    {
        if !self.enabled(level) {
            return;
        }
        let args = build().into_log_args();
        self.write_record(level, &args.as_refs());
    }

    pub fn fatal(&self, args: &[&dyn Stringify]) {
        self.emit("FATAL", args);
    }

    pub fn error(&self, args: &[&dyn Stringify]) {
        self.emit("ERROR", args);
    }

    pub fn warn(&self, args: &[&dyn Stringify]) {
        self.emit("WARN", args);
    }

    pub fn info(&self, args: &[&dyn Stringify]) {
        self.emit("INFO", args);
    }

    pub fn debug(&self, args: &[&dyn Stringify]) {
        self.emit("DEBUG", args);
    }

    /// Consume the logger and hand back its sink.
    pub fn into_sink(self) -> S {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, level: &str, args: &[&dyn Stringify]) {
        let level = level.to_ascii_uppercase();
        let timestamp = (self.clock)();

        let mut record: Vec<&dyn Stringify> = Vec::with_capacity(args.len() + 2);
        record.push(&level);
        record.push(&timestamp);
        record.extend(args.iter().copied());

        // Rendering happens before the sink is locked: a value's Display may
        // itself log through this logger.
        let (rendered, failure) = render(&record);

        // Held for the whole line so concurrent emits never interleave.
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _line = sink.line_guard();
        let written = write_fragments(&mut *sink, &rendered, record.len()).and_then(|()| {
            match failure {
                Some(failure) => Err(failure),
                None => finish_line(&mut *sink, record.len()),
            }
        });
        if let Err(failure) = written {
            abort(&mut *sink, &record, &rendered, &failure);
        }
    }
}

/// Stringifies the record up to the first failure.
fn render(record: &[&dyn Stringify]) -> (Vec<String>, Option<EmitFailure>) {
    let mut rendered = Vec::with_capacity(record.len());
    for (index, arg) in record.iter().enumerate() {
        match arg.stringify() {
            Ok(text) => rendered.push(text),
            Err(source) => return (rendered, Some(EmitFailure::Stringify { index, source })),
        }
    }
    (rendered, None)
}

/// Writes each rendered argument as its own fragment, followed by a space
/// unless it is the last of `total`.
fn write_fragments<S: OutputSink>(
    sink: &mut S,
    rendered: &[String],
    total: usize,
) -> Result<(), EmitFailure> {
    let last = total.saturating_sub(1);
    for (index, text) in rendered.iter().enumerate() {
        let (kept, hint) = truncate(text);
        let write_failed = |source| EmitFailure::Write {
            index,
            rendered_len: text.chars().count(),
            source,
        };

        sink.write(kept).map_err(write_failed)?;
        if let Some(hint) = &hint {
            sink.write(hint).map_err(write_failed)?;
        }
        if index < last {
            sink.write(" ").map_err(write_failed)?;
        }
    }
    Ok(())
}

fn finish_line<S: OutputSink>(sink: &mut S, total: usize) -> Result<(), EmitFailure> {
    sink.write("\n")
        .and_then(|()| sink.flush())
        .map_err(|source| EmitFailure::Write {
            index: total.saturating_sub(1),
            rendered_len: 0,
            source,
        })
}

/// Lists the record for the fatal dump: rendered values where rendering
/// succeeded, `<type>` for the rest.
fn describe_args(record: &[&dyn Stringify], rendered: &[String]) -> String {
    let items: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(index, arg)| match rendered.get(index) {
            Some(text) => format!("{:?}", truncate(text).0),
            None => format!("<{}>", arg.type_name()),
        })
        .collect();
    format!("[{}]", items.join(", "))
}

fn abort<S: OutputSink>(
    sink: &mut S,
    record: &[&dyn Stringify],
    rendered: &[String],
    failure: &EmitFailure,
) -> ! {
    let raw = describe_args(record, rendered);
    let offending = record
        .get(failure.index())
        .map_or("<missing>", |arg| arg.type_name());
    let cause = failure
        .source()
        .map(|source| format!(": {source}"))
        .unwrap_or_default();
    let trace = Backtrace::force_capture();

    let report = format!(
        "{DIAGNOSTIC_TAG}::args: {raw}\n\
         {DIAGNOSTIC_TAG}::arg: #{index} {offending}\n\
         {DIAGNOSTIC_TAG}::emit:partial_len: {partial}\n\
         {DIAGNOSTIC_TAG}::emit:error: {failure}{cause}\n{trace}\n",
        index = failure.index(),
        partial = failure.partial_len(),
    );
    let _ = sink.write_error(&report);
    sink.terminate(FATAL_EXIT_CODE)
}
