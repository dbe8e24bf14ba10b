//! Behavioral wrappers built on the logger contract
//!
//! Each wrapper takes a function and a logger and returns an
//! instrumented function. The enabled check runs before any
//! instrumentation, so a disabled level costs one atomic load and
//! nothing else. Argument and result inspection uses `Debug`.

use crate::core::dispatch::LogArgs;
use crate::core::error::{LoggerError, Result};
use crate::core::log_level::LogLevel;
use crate::core::log_record::Details;
use crate::core::logger::Logger;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::json;
use std::fmt;
use std::time::{Duration, Instant};

/// Wrap `f` so that, while trace is enabled on `logger`, each call logs
/// entry as `"<name>(<args>)"`, then `"RETURNS <value>"` or
/// `"THROWS <error>"`, propagating the error unchanged. While trace is
/// disabled, calls go straight to `f`.
pub fn traced<A, T, E, F>(
    logger: &Logger,
    name: impl Into<String>,
    f: F,
) -> impl Fn(A) -> std::result::Result<T, E>
where
    F: Fn(A) -> std::result::Result<T, E>,
    A: fmt::Debug,
    T: fmt::Debug,
    E: fmt::Display,
{
    let logger = logger.clone();
    let name = name.into();
    move |args: A| {
        if !logger.enabled(LogLevel::Trace) {
            return f(args);
        }
        logger.trace(format!("{}({:?})", name, args));
        match f(args) {
            Ok(value) => {
                logger.trace(format!("RETURNS {:?}", value));
                Ok(value)
            }
            Err(error) => {
                logger.trace(format!("THROWS {}", error));
                Err(error)
            }
        }
    }
}

struct Stopwatch {
    logger: Logger,
    name: String,
    started: Instant,
    start_time: DateTime<Utc>,
}

impl Stopwatch {
    fn start(logger: Logger, name: String) -> Self {
        Self {
            logger,
            name,
            started: Instant::now(),
            start_time: Utc::now(),
        }
    }
}

// The drop guard is the "finally": the measurement record is emitted on
// scope exit whether the wrapped call returned or unwound.
impl Drop for Stopwatch {
    fn drop(&mut self) {
        let millis = self.started.elapsed().as_millis() as u64;
        let mut details = Details::new();
        details.insert("name".to_string(), json!(self.name));
        details.insert("start_time".to_string(), json!(self.start_time.to_rfc3339()));
        details.insert("duration_ms".to_string(), json!(millis));
        self.logger.log(
            LogLevel::Performance,
            LogArgs::message(format!("{} -\t{}ms", self.name, millis)).with_details(details),
        );
    }
}

/// Wrap `f` so that, while performance is enabled on `logger`, each
/// call is timed under a name keyed by `name` plus the inspected
/// arguments, emitting one performance record with the duration, start
/// time, and timer name. While disabled, calls go straight to `f`.
pub fn measured<A, T, E, F>(
    logger: &Logger,
    name: impl Into<String>,
    f: F,
) -> impl Fn(A) -> std::result::Result<T, E>
where
    F: Fn(A) -> std::result::Result<T, E>,
    A: fmt::Debug,
{
    let logger = logger.clone();
    let name = name.into();
    move |args: A| {
        if !logger.enabled(LogLevel::Performance) {
            return f(args);
        }
        let _timer = Stopwatch::start(logger.clone(), format!("{}({:?})", name, args));
        f(args)
    }
}

/// Wrap `f` so that the first call, and at most one call per rolling
/// one-second window after it, warns
/// `"<method_name> is deprecated. <instruction>"`. Every call delegates
/// to `f` whether or not a warning was emitted.
///
/// Fails at wrap time with [`LoggerError::DecoratorUsage`] when
/// `method_name` or `instruction` is empty.
pub fn deprecated<A, R, F>(
    logger: &Logger,
    method_name: impl Into<String>,
    instruction: impl Into<String>,
    f: F,
) -> Result<impl Fn(A) -> R>
where
    F: Fn(A) -> R,
{
    let method_name = method_name.into();
    let instruction = instruction.into();
    if method_name.is_empty() {
        return Err(LoggerError::decorator_usage(
            "deprecated requires a qualified method name",
        ));
    }
    if instruction.is_empty() {
        return Err(LoggerError::decorator_usage(
            "deprecated requires a migration instruction",
        ));
    }

    let logger = logger.clone();
    let last_warned: Mutex<Option<Instant>> = Mutex::new(None);
    Ok(move |args: A| {
        let warn_now = {
            let mut last = last_warned.lock();
            let now = Instant::now();
            let due = last.map_or(true, |at| now.duration_since(at) >= Duration::from_secs(1));
            if due {
                *last = Some(now);
            }
            due
        };
        if warn_now {
            logger.warning(format!("{} is deprecated. {}", method_name, instruction));
        }
        f(args)
    })
}
