//! Byte-stream destinations for the logger.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serialises lines across every [`StdSink`] in the process.
static STDOUT_LINE: Mutex<()> = Mutex::new(());

/// Where a [`Logger`](super::Logger) writes.
///
/// `write` receives the fragments of a normal log line, `write_error` the
/// diagnostic dump of the fatal path, and `terminate` ends the process once
/// that dump has been written.
pub trait OutputSink: Send + 'static {
    /// Append raw text to the normal output stream. No newline is added.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Append raw text to the diagnostic stream.
    fn write_error(&mut self, text: &str) -> io::Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Taken for the duration of one line. Sinks whose stream is shared
    /// with other sinks return a process-wide guard.
    fn line_guard(&self) -> Option<MutexGuard<'static, ()>> {
        None
    }

    /// End the process with `code`.
    fn terminate(&mut self, code: i32) -> !;
}

/// Standard output for log lines, standard error for diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSink;

impl OutputSink for StdSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    fn write_error(&mut self, text: &str) -> io::Result<()> {
        io::stderr().lock().write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    fn line_guard(&self) -> Option<MutexGuard<'static, ()>> {
        Some(STDOUT_LINE.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn terminate(&mut self, code: i32) -> ! {
        let _ = io::stdout().lock().flush();
        std::process::exit(code)
    }
}
