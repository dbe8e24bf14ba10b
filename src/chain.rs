//! Chained errors with structured context
//!
//! [`ChainedError`] wraps a message with an optional prior cause and
//! optional structured info. Info merges across the cause chain with
//! outer keys winning; [`ChainedError::full_stack`] renders every link
//! joined by `"caused by: "` markers. [`error_from_list`] aggregates
//! several errors into one.

use crate::core::error::{LoggerError, Result};
use crate::core::log_record::Details;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

const DEFAULT_NAME: &str = "ChainedError";
const MULTI_ERROR_NAME: &str = "MultiError";

/// An immutable error value carrying a message, an optional cause, and
/// optional structured info. Construct it once at the failure site.
#[derive(Debug, Clone)]
pub struct ChainedError {
    name: String,
    message: String,
    backtrace: Option<String>,
    info: Option<Details>,
    cause: Option<Box<ChainedError>>,
    members: Vec<ChainedError>,
}

/// One positional argument of the variadic construction form
#[derive(Debug, Clone)]
pub enum ErrorArg {
    Cause(ChainedError),
    Info(Details),
    Text(String),
}

/// Classified construction arguments: at most one leading cause and one
/// leading info (either order), then the message, then message params.
#[derive(Debug, Clone)]
pub struct ParsedErrorArgs {
    pub cause: Option<ChainedError>,
    pub info: Option<Details>,
    pub message: String,
    pub params: Vec<String>,
}

/// Classify a positional argument list, rejecting shapes that cannot be
/// disambiguated. Pure; the variadic constructor is built on top.
pub fn parse_error_args(args: Vec<ErrorArg>) -> Result<ParsedErrorArgs> {
    let mut cause = None;
    let mut info = None;
    let mut message: Option<String> = None;
    let mut params = Vec::new();

    for arg in args {
        match arg {
            ErrorArg::Text(text) => {
                if message.is_none() {
                    message = Some(text);
                } else {
                    params.push(text);
                }
            }
            ErrorArg::Cause(value) => {
                if message.is_some() {
                    return Err(LoggerError::invalid_construction(
                        "cause argument after the message",
                    ));
                }
                if cause.replace(value).is_some() {
                    return Err(LoggerError::invalid_construction(
                        "more than one cause argument",
                    ));
                }
            }
            ErrorArg::Info(value) => {
                if message.is_some() {
                    return Err(LoggerError::invalid_construction(
                        "info argument after the message",
                    ));
                }
                if info.replace(value).is_some() {
                    return Err(LoggerError::invalid_construction(
                        "more than one info argument",
                    ));
                }
            }
        }
    }

    let message = message.ok_or_else(|| LoggerError::invalid_construction("missing message"))?;
    Ok(ParsedErrorArgs {
        cause,
        info,
        message,
        params,
    })
}

fn capture_backtrace() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

impl ChainedError {
    fn assemble(
        message: String,
        cause: Option<ChainedError>,
        info: Option<Details>,
    ) -> ChainedError {
        ChainedError {
            name: DEFAULT_NAME.to_string(),
            message,
            backtrace: capture_backtrace(),
            info,
            cause: cause.map(Box::new),
            members: Vec::new(),
        }
    }

    pub fn new(message: impl Into<String>) -> Self {
        Self::assemble(message.into(), None, None)
    }

    pub fn with_cause(cause: ChainedError, message: impl Into<String>) -> Self {
        Self::assemble(message.into(), Some(cause), None)
    }

    pub fn with_info(info: Details, message: impl Into<String>) -> Self {
        Self::assemble(message.into(), None, Some(info))
    }

    pub fn with_cause_info(
        cause: ChainedError,
        info: Details,
        message: impl Into<String>,
    ) -> Self {
        Self::assemble(message.into(), Some(cause), Some(info))
    }

    /// Variadic construction form: classify `args`, join message params
    /// onto the message, and fail fast on ambiguous shapes.
    pub fn build(args: Vec<ErrorArg>) -> Result<ChainedError> {
        let parsed = parse_error_args(args)?;
        let message = if parsed.params.is_empty() {
            parsed.message
        } else {
            let mut parts = vec![parsed.message];
            parts.extend(parsed.params);
            parts.join(" ")
        };
        Ok(Self::assemble(message, parsed.cause, parsed.info))
    }

    /// Convert a std error and its `source()` chain into a chained error
    pub fn from_std(error: &(dyn StdError + 'static)) -> ChainedError {
        let cause = error.source().map(ChainedError::from_std);
        Self::assemble(error.to_string(), cause, None)
    }

    /// Override the concrete subtype name (defaults to "ChainedError")
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause: the first member for an aggregate, otherwise
    /// the construction-time cause
    pub fn cause(&self) -> Option<&ChainedError> {
        if let Some(first) = self.members.first() {
            return Some(first);
        }
        self.cause.as_deref()
    }

    /// Merged structured info.
    ///
    /// For an aggregate: the members' info shallow-merged in order,
    /// later members winning. Otherwise: own info shallow-merged on top
    /// of the cause chain's merged info, outer keys winning.
    pub fn info(&self) -> Details {
        if !self.members.is_empty() {
            let mut merged = Details::new();
            for member in &self.members {
                for (key, value) in member.info() {
                    merged.insert(key, value);
                }
            }
            return merged;
        }
        let mut merged = self
            .cause
            .as_ref()
            .map(|cause| cause.info())
            .unwrap_or_default();
        if let Some(own) = &self.info {
            for (key, value) in own {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// This error's own stack rendering: the `"<Name>: <message>"`
    /// header plus the captured backtrace when one is available
    pub fn stack(&self) -> String {
        match &self.backtrace {
            Some(backtrace) => format!("{}: {}\n{}", self.name, self.message, backtrace),
            None => format!("{}: {}", self.name, self.message),
        }
    }

    /// Full multi-line rendering of the whole chain, outermost first,
    /// each cause introduced by a `"caused by: "` marker
    pub fn full_stack(&self) -> String {
        match self.cause() {
            Some(cause) => format!("{}\ncaused by: {}", self.stack(), cause.full_stack()),
            None => self.stack(),
        }
    }
}

impl fmt::Display for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl StdError for ChainedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause().map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Walk `err` and its causes, returning the first link whose name
/// equals `name`
pub fn find_cause_by_name<'a>(err: &'a ChainedError, name: &str) -> Option<&'a ChainedError> {
    let mut current = Some(err);
    while let Some(link) = current {
        if link.name() == name {
            return Some(link);
        }
        current = link.cause();
    }
    None
}

/// Boolean form of [`find_cause_by_name`]
pub fn has_cause_with_name(err: &ChainedError, name: &str) -> bool {
    find_cause_by_name(err, name).is_some()
}

/// Aggregate a list of errors: empty yields `None`, a singleton yields
/// that error unchanged, more become one aggregate whose cause is the
/// first member
pub fn error_from_list(mut errors: Vec<ChainedError>) -> Option<ChainedError> {
    match errors.len() {
        0 => None,
        1 => errors.pop(),
        _ => {
            let message = format!("first of {} errors: {}", errors.len(), errors[0].message());
            Some(ChainedError {
                name: MULTI_ERROR_NAME.to_string(),
                message,
                backtrace: capture_backtrace(),
                info: None,
                cause: None,
                members: errors,
            })
        }
    }
}

/// Invoke `cb` once per contained error of an aggregate, in original
/// order; for any other error, once with the error itself
pub fn error_for_each(err: &ChainedError, mut cb: impl FnMut(&ChainedError)) {
    if err.members.is_empty() {
        cb(err);
    } else {
        for member in &err.members {
            cb(member);
        }
    }
}
