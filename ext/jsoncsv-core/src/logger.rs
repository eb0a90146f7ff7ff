// Logger module for the store
// Forwards diagnostics to the `log` facade and, in debug mode, to stderr

use std::str::FromStr;

use crate::StoreError;

const LOG_LEVEL_ENV: &str = "JSONCSV_LOG_LEVEL";
const LOG_TARGET: &str = "jsoncsv";

/// Severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => {
                return Err(StoreError::invalid_config(format!(
                    "Invalid log level: {}",
                    s
                )))
            }
        })
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Diagnostic sink owned by a store
///
/// Messages are built lazily; nothing is formatted unless the level passes.
#[derive(Debug, Clone)]
pub struct StoreLogger {
    console: bool,
    level: LogLevel,
}

impl StoreLogger {
    pub fn new(debug_mode: bool) -> Self {
        let environment_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|s| s.parse::<LogLevel>().ok())
            .unwrap_or(LogLevel::Warn);

        Self::with_level(debug_mode, environment_level)
    }

    /// Debug mode always lowers the level to [`LogLevel::Debug`]
    pub fn with_level(debug_mode: bool, level: LogLevel) -> Self {
        Self {
            console: debug_mode,
            level: if debug_mode { LogLevel::Debug } else { level },
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn is_console(&self) -> bool {
        self.console
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level <= level
    }

    fn log(&self, level: LogLevel, message: &str) {
        log::log!(target: LOG_TARGET, log::Level::from(level), "{}", message);
        if self.console {
            eprintln!("[{}] {}", LOG_TARGET, message);
        }
    }

    fn log_with<F, S>(&self, level: LogLevel, message_fn: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        if self.enabled(level) {
            let message = message_fn();
            self.log(level, message.as_ref());
        }
    }

    /// Log a debug message
    pub fn debug<F, S>(&self, message_fn: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        self.log_with(LogLevel::Debug, message_fn)
    }

    /// Log an info message
    pub fn info<F, S>(&self, message_fn: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        self.log_with(LogLevel::Info, message_fn)
    }

    /// Log a warning message
    pub fn warn<F, S>(&self, message_fn: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        self.log_with(LogLevel::Warn, message_fn)
    }

    /// Log an error message
    pub fn error<F, S>(&self, message_fn: F)
    where
        F: FnOnce() -> S,
        S: AsRef<str>,
    {
        self.log_with(LogLevel::Error, message_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_parse_level() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_debug_mode_lowers_level() {
        let logger = StoreLogger::with_level(true, LogLevel::Error);
        assert_eq!(logger.level(), LogLevel::Debug);
        assert!(logger.is_console());
        assert!(logger.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_messages_below_level_are_not_built() {
        let logger = StoreLogger::with_level(false, LogLevel::Warn);
        let built = Cell::new(0);

        logger.debug(|| {
            built.set(built.get() + 1);
            "hidden"
        });
        logger.info(|| {
            built.set(built.get() + 1);
            "hidden"
        });
        assert_eq!(built.get(), 0);

        logger.warn(|| {
            built.set(built.get() + 1);
            "shown"
        });
        logger.error(|| {
            built.set(built.get() + 1);
            "shown"
        });
        assert_eq!(built.get(), 2);
    }
}
