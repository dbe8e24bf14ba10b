//! # treetrace
//!
//! Hierarchical structured logging: named loggers arranged in a tree,
//! each with an independently adjustable severity threshold, emitting
//! immutable records to a dynamically configurable set of handlers.
//!
//! ## Features
//!
//! - **Logger tree**: dotted-path lookup with lazy node creation and
//!   level snapshot inheritance
//! - **Cheap disabled path**: a disabled log call costs one atomic
//!   compare; macros skip format-argument evaluation entirely
//! - **Composable handlers**: level filters, name/pattern scoping,
//!   worker-thread deferral, bounded ring-buffer capture
//! - **Chained errors**: causal chains with merged structured info and
//!   full-stack rendering
//!
//! ## Quick start
//!
//! ```
//! use treetrace::prelude::*;
//!
//! let log = treetrace::logger("server.http").unwrap();
//! log.set_level(LogLevel::Debug);
//!
//! let ring = RingBufferHandler::new(50);
//! let handler = ring.handler();
//! treetrace::register_log_handler(&handler);
//!
//! log.info("listening on 0.0.0.0:8080");
//! assert_eq!(ring.len(), 1);
//!
//! treetrace::unregister_log_handler(&handler);
//! ```

pub mod chain;
pub mod core;
pub mod handlers;
pub mod macros;
pub mod wrap;

pub mod prelude {
    pub use crate::chain::{
        error_for_each, error_from_list, find_cause_by_name, has_cause_with_name, ChainedError,
        ErrorArg,
    };
    pub use crate::core::{
        logger, reset, root_logger, Details, LazyMessage, LogArgs, LogLevel, LogRecord, Logger,
        LoggerError, Rank, Result, ALL, OFF,
    };
    pub use crate::handlers::{
        capture_logging, console_handler, deferred, for_logger, from_level, handler,
        register_log_handler, unregister_log_handler, Capture, LogHandler, LoggerSelector,
        RingBuffer, RingBufferHandler,
    };
    pub use crate::wrap::{deprecated, measured, traced};
}

pub use chain::{
    error_for_each, error_from_list, find_cause_by_name, has_cause_with_name, parse_error_args,
    ChainedError, ErrorArg, ParsedErrorArgs,
};
pub use self::core::{
    logger, reset, root_logger, Details, LazyMessage, LogArgs, LogLevel, LogRecord, Logger,
    LoggerError, Rank, Result, ALL, OFF,
};
pub use handlers::{
    capture_logging, console_handler, deferred, for_logger, from_level, handler,
    register_log_handler, unregister_log_handler, Capture, LogHandler, LoggerSelector, RingBuffer,
    RingBufferHandler, DEFAULT_RING_BUFFER_SIZE,
};
pub use wrap::{deprecated, measured, traced};

#[doc(hidden)]
pub use serde_json as __serde_json;
