//! Logging macros with call-site laziness
//!
//! Each macro checks whether the level is enabled on the target logger
//! before evaluating its format arguments, so a disabled trace or debug
//! call left in a hot path costs a single threshold comparison.
//!
//! # Examples
//!
//! ```
//! use treetrace::prelude::*;
//! use treetrace::info;
//!
//! let log = treetrace::logger("server.http").unwrap();
//!
//! let port = 8080;
//! info!(log, "listening on port {}", port);
//! ```

/// Log a message at an explicit level, evaluating the format arguments
/// only when the level is enabled.
///
/// # Examples
///
/// ```
/// # use treetrace::prelude::*;
/// # let log = treetrace::logger("docs.log").unwrap();
/// use treetrace::log;
/// log!(log, LogLevel::Info, "request handled in {}ms", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, format!($($arg)+))
        } else {
            false
        }
    }};
}

/// Log a trace-level message
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a performance-level message
#[macro_export]
macro_rules! performance {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Performance, $($arg)+)
    };
}

/// Log an info-level message
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Build a [`Details`](crate::Details) map with `serde_json` object
/// syntax.
///
/// # Examples
///
/// ```
/// use treetrace::details;
///
/// let d = details! { "port": 8080, "tls": true };
/// assert_eq!(d["port"], 8080);
/// ```
#[macro_export]
macro_rules! details {
    ($($body:tt)+) => {{
        match $crate::__serde_json::json!({ $($body)+ }) {
            $crate::__serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }};
}
