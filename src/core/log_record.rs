//! Immutable log record and lazy message formatting

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Structured detail fields attached to a record
pub type Details = serde_json::Map<String, serde_json::Value>;

/// One accepted log event. Constructed once by the dispatcher and never
/// mutated afterwards; handlers receive a shared reference.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Fully-qualified dotted name of the emitting logger
    pub logger: String,
    pub level: LogLevel,
    pub time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
    pub message: LazyMessage,
}

impl LogRecord {
    pub fn new(
        logger: impl Into<String>,
        level: LogLevel,
        details: Option<Details>,
        message: LazyMessage,
    ) -> Self {
        Self {
            logger: logger.into(),
            level,
            time: Utc::now(),
            details,
            message,
        }
    }
}

/// Message text computed once on first read and cached.
///
/// Holds the stringified message parameters; the formatted string is
/// the single-space join of the parts. Repeated reads after the first
/// never re-run the join.
pub struct LazyMessage {
    parts: Vec<String>,
    resolved: OnceLock<String>,
}

impl LazyMessage {
    /// A message that will be joined from `parts` on first read
    pub fn new(parts: Vec<String>) -> Self {
        Self {
            parts,
            resolved: OnceLock::new(),
        }
    }

    /// A pre-formatted message; no join will ever run
    pub fn eager(text: impl Into<String>) -> Self {
        let resolved = OnceLock::new();
        let _ = resolved.set(text.into());
        Self {
            parts: Vec::new(),
            resolved,
        }
    }

    /// The formatted message, computing and caching it on first access
    pub fn as_str(&self) -> &str {
        self.resolved.get_or_init(|| self.parts.join(" "))
    }

    /// Whether the formatter has run yet
    #[cfg(test)]
    pub(crate) fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl Clone for LazyMessage {
    fn clone(&self) -> Self {
        let resolved = OnceLock::new();
        if let Some(text) = self.resolved.get() {
            let _ = resolved.set(text.clone());
        }
        Self {
            parts: self.parts.clone(),
            resolved,
        }
    }
}

impl fmt::Display for LazyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for LazyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved.get() {
            Some(text) => write!(f, "LazyMessage({:?})", text),
            None => write!(f, "LazyMessage(unresolved {:?})", self.parts),
        }
    }
}

impl Serialize for LazyMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl PartialEq<&str> for LazyMessage {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
