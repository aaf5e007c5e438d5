pub mod config;
pub mod format;
pub mod logger;
pub mod utilities;

pub use format::{sprintf, sprintfd, DeferredValue, FormatError};
pub use logger::{LogLevel, Logger, Stringify};

#[cfg(test)]
mod test_utilities;
