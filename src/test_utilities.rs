//! Shared fixtures for unit tests: an in-memory sink, a fixed clock and a
//! stdout redirection helper.

use crate::logger::{Logger, OutputSink};
use std::io;
use std::os::fd::{AsFd, AsRawFd};
use std::sync::{Arc, Mutex};

pub const FIXED_TIMESTAMP: &str = "Sat Oct 17 2026 09:30:00 GMT+0000";

/// Serialises tests that touch the global logger or the stdout descriptor.
static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

pub fn lock_global() -> std::sync::MutexGuard<'static, ()> {
    GLOBAL_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub fn fixed_clock() -> String {
    FIXED_TIMESTAMP.to_string()
}

/// Sink that records everything in shared buffers.
///
/// `terminate` panics with `terminated with status <code>` so the fatal path
/// can be asserted with `#[should_panic]` or `catch_unwind`.
#[derive(Clone, Default)]
pub struct CaptureSink {
    out: Arc<Mutex<String>>,
    err: Arc<Mutex<String>>,
    writes: Arc<Mutex<Vec<String>>>,
    fail_writes: bool,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every normal write fails.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn output(&self) -> String {
        self.out.lock().unwrap().clone()
    }

    pub fn errors(&self) -> String {
        self.err.lock().unwrap().clone()
    }

    /// Individual `write` calls, in order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_string).collect()
    }
}

impl OutputSink for CaptureSink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        self.out.lock().unwrap().push_str(text);
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn write_error(&mut self, text: &str) -> io::Result<()> {
        self.err.lock().unwrap().push_str(text);
        Ok(())
    }

    fn terminate(&mut self, code: i32) -> ! {
        panic!("terminated with status {code}")
    }
}

/// Logger over a fresh [`CaptureSink`] with a fixed clock. The returned sink
/// shares its buffers with the one inside the logger.
pub fn capture_logger() -> (Logger<CaptureSink>, CaptureSink) {
    let sink = CaptureSink::new();
    let logger = Logger::new(sink.clone()).with_clock(fixed_clock);
    (logger, sink)
}

/// Run `f` with the process's stdout redirected to a temporary file and
/// return what was written.
pub fn capture_stdout<F: FnOnce()>(f: F) -> String {
    use std::io::{Read, Seek, SeekFrom, Write};

    let mut reader = tempfile::tempfile().unwrap();
    let writer = reader.try_clone().unwrap();

    io::stdout().flush().unwrap();
    let saved = unsafe { libc::dup(libc::STDOUT_FILENO) };
    unsafe { libc::dup2(writer.as_fd().as_raw_fd(), libc::STDOUT_FILENO) };

    f();
    io::stdout().flush().unwrap();

    unsafe { libc::dup2(saved, libc::STDOUT_FILENO) };
    unsafe { libc::close(saved) };

    reader.seek(SeekFrom::Start(0)).unwrap();
    let mut output = String::new();
    reader.read_to_string(&mut output).unwrap();
    output
}
