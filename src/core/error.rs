//! Error types for the logging facility
//!
//! All three variants are programmer errors: they surface synchronously
//! at the call that caused them and are never retried or coerced.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A logger path contained an empty segment (e.g. `"a..b"`)
    #[error("invalid logger name '{path}': empty path segment")]
    InvalidName { path: String },

    /// A chained error was constructed with an ambiguous argument shape
    #[error("invalid error construction: {reason}")]
    InvalidConstruction { reason: String },

    /// A wrapper was applied to an unsupported target
    #[error("invalid wrapper usage: {reason}")]
    DecoratorUsage { reason: String },
}

impl LoggerError {
    /// Create an invalid-name error for a logger path
    pub fn invalid_name(path: impl Into<String>) -> Self {
        LoggerError::InvalidName { path: path.into() }
    }

    /// Create an invalid-construction error
    pub fn invalid_construction(reason: impl Into<String>) -> Self {
        LoggerError::InvalidConstruction {
            reason: reason.into(),
        }
    }

    /// Create a decorator-usage error
    pub fn decorator_usage(reason: impl Into<String>) -> Self {
        LoggerError::DecoratorUsage {
            reason: reason.into(),
        }
    }
}
