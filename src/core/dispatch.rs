//! Log call normalization and handler dispatch
//!
//! Every per-level method funnels into [`Logger::log`]: a single
//! threshold check, argument normalization into a [`LogRecord`], and
//! synchronous dispatch to the registered handlers in registration
//! order. The disabled path does nothing but compare one atomic load
//! against the level's rank.

use super::log_level::LogLevel;
use super::log_record::{Details, LazyMessage, LogRecord};
use super::logger::Logger;
use crate::chain::ChainedError;
use chrono::Utc;

/// Normalized arguments of one log call: an optional error, optional
/// explicit details, and the message parameters.
#[derive(Debug, Clone, Default)]
pub struct LogArgs {
    error: Option<ChainedError>,
    details: Option<Details>,
    parts: Vec<String>,
}

impl LogArgs {
    /// Empty argument list (the "is this level enabled" probe)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a message parameter
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            parts: vec![text.into()],
            ..Self::default()
        }
    }

    /// Attach explicit structured details; their keys win over keys
    /// extracted from an attached error
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach an error; its stack and merged info feed the record's
    /// details, and its display form becomes the fallback message
    pub fn with_error(mut self, error: &ChainedError) -> Self {
        self.error = Some(error.clone());
        self
    }

    /// Append a further message parameter
    pub fn and(mut self, part: impl ToString) -> Self {
        self.parts.push(part.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.details.is_none() && self.parts.is_empty()
    }
}

impl From<&str> for LogArgs {
    fn from(text: &str) -> Self {
        LogArgs::message(text)
    }
}

impl From<String> for LogArgs {
    fn from(text: String) -> Self {
        LogArgs::message(text)
    }
}

impl From<&ChainedError> for LogArgs {
    fn from(error: &ChainedError) -> Self {
        LogArgs::new().with_error(error)
    }
}

impl From<(&ChainedError, &str)> for LogArgs {
    fn from((error, text): (&ChainedError, &str)) -> Self {
        LogArgs::message(text).with_error(error)
    }
}

impl From<(Details, &str)> for LogArgs {
    fn from((details, text): (Details, &str)) -> Self {
        LogArgs::message(text).with_details(details)
    }
}

impl From<(&ChainedError, Details, &str)> for LogArgs {
    fn from((error, details, text): (&ChainedError, Details, &str)) -> Self {
        LogArgs::message(text).with_error(error).with_details(details)
    }
}

impl Logger {
    /// Whether a record at `level` would currently be dispatched
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level() <= level.rank()
    }

    /// Dispatch one log call at `level`.
    ///
    /// Returns `false` without further work when the level is disabled.
    /// An enabled call with empty arguments returns `true` without
    /// emitting a record. Otherwise the arguments are normalized into
    /// an immutable [`LogRecord`] handed to every registered handler in
    /// registration order, or to the default console handler when none
    /// are registered.
    pub fn log(&self, level: LogLevel, args: impl Into<LogArgs>) -> bool {
        if !self.enabled(level) {
            return false;
        }
        let args = args.into();
        if args.is_empty() {
            return true;
        }
        let record = build_record(self.name(), level, args);
        dispatch(&record);
        true
    }

    pub fn trace(&self, args: impl Into<LogArgs>) -> bool {
        self.log(LogLevel::Trace, args)
    }

    pub fn debug(&self, args: impl Into<LogArgs>) -> bool {
        self.log(LogLevel::Debug, args)
    }

    pub fn performance(&self, args: impl Into<LogArgs>) -> bool {
        self.log(LogLevel::Performance, args)
    }

    pub fn info(&self, args: impl Into<LogArgs>) -> bool {
        self.log(LogLevel::Info, args)
    }

    pub fn warning(&self, args: impl Into<LogArgs>) -> bool {
        self.log(LogLevel::Warning, args)
    }

    pub fn error(&self, args: impl Into<LogArgs>) -> bool {
        self.log(LogLevel::Error, args)
    }
}

/// Record construction is all-or-nothing: a call that reaches this
/// point either yields a complete record or panics before any handler
/// sees a partial one.
fn build_record(logger: &str, level: LogLevel, args: LogArgs) -> LogRecord {
    let LogArgs {
        error,
        details: explicit,
        parts,
    } = args;

    let details = match (&error, explicit) {
        (Some(err), explicit) => {
            let mut merged = Details::new();
            merged.insert(
                "stack".to_string(),
                serde_json::Value::String(err.full_stack()),
            );
            for (key, value) in err.info() {
                merged.insert(key, value);
            }
            if let Some(explicit) = explicit {
                for (key, value) in explicit {
                    merged.insert(key, value);
                }
            }
            Some(merged)
        }
        (None, explicit) => explicit,
    };

    let message = if parts.is_empty() {
        match &error {
            Some(err) => LazyMessage::eager(err.to_string()),
            None => LazyMessage::new(Vec::new()),
        }
    } else {
        LazyMessage::new(parts)
    };

    LogRecord {
        logger: logger.to_string(),
        level,
        time: Utc::now(),
        details,
        message,
    }
}

/// Handlers run synchronously in registration order. A panicking
/// handler propagates to the log caller; handler robustness is each
/// handler's own responsibility.
fn dispatch(record: &LogRecord) {
    let handlers = crate::handlers::active_handlers();
    if handlers.is_empty() {
        crate::handlers::console_handler(record);
        return;
    }
    for handler in &handlers {
        handler(record);
    }
}
