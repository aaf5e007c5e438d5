//! Level table and threshold state for the logger.
//!
//! Levels are ranked so that a lower rank is more urgent. A record is emitted
//! when its rank is positive and not above the current threshold, so `NONE`
//! (rank 0) never prints. Any name outside the table resolves to
//! [`UNREPRESENTABLE_RANK`], above every real threshold, so such lines are
//! dropped unless the threshold itself was set from an unknown name.

use std::sync::atomic::{AtomicU8, Ordering};

/// Rank given to any level name that is not in the table.
pub const UNREPRESENTABLE_RANK: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    None = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::None,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Returns a short string representation suitable for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Case-insensitive lookup in the level table.
    pub fn from_name(name: &str) -> Option<LogLevel> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    pub fn from_rank(rank: u8) -> Option<LogLevel> {
        LogLevel::ALL.get(usize::from(rank)).copied()
    }
}

/// Resolves a level name to its rank. Unknown names yield [`UNREPRESENTABLE_RANK`].
pub fn parse(name: &str) -> u8 {
    LogLevel::from_name(name).map_or(UNREPRESENTABLE_RANK, |level| level.rank())
}

/// Mutable threshold consulted on every emit.
#[derive(Debug)]
pub struct LoggerState {
    threshold_rank: AtomicU8,
}

impl LoggerState {
    pub const fn new() -> Self {
        Self::with_rank(LogLevel::Info as u8)
    }

    pub const fn with_rank(rank: u8) -> Self {
        Self {
            threshold_rank: AtomicU8::new(rank),
        }
    }

    /// Sets the threshold from a level name. Unknown names are accepted and
    /// resolve to [`UNREPRESENTABLE_RANK`], which opens the gate to every level.
    pub fn set_threshold(&self, name: &str) {
        self.threshold_rank.store(parse(name), Ordering::Relaxed);
    }

    pub fn threshold(&self) -> u8 {
        self.threshold_rank.load(Ordering::Relaxed)
    }

    /// Whether a record at `rank` passes the gate.
    pub fn allows(&self, rank: u8) -> bool {
        rank > 0 && rank <= self.threshold()
    }
}

impl Default for LoggerState {
    fn default() -> Self {
        Self::new()
    }
}
