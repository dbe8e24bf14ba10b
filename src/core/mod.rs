//! Core logger types: levels, records, the logger tree, and dispatch

pub mod dispatch;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod logger;

pub use dispatch::LogArgs;
pub use error::{LoggerError, Result};
pub use log_level::{LogLevel, Rank, ALL, OFF};
pub use log_record::{Details, LazyMessage, LogRecord};
pub use logger::{logger, reset, root_logger, Logger};
