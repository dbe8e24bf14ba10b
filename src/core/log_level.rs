//! Log level definitions
//!
//! Levels carry explicit integer ranks with a 100-wide gap between
//! neighbors, leaving headroom for threshold arithmetic without
//! colliding with an adjacent level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer severity rank used for threshold comparisons (lower = more verbose).
pub type Rank = i32;

/// Threshold below every level: a logger set to this emits everything.
pub const ALL: Rank = Rank::MIN;

/// Threshold above every level: a logger set to this emits nothing.
pub const OFF: Rank = Rank::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Trace = 100,
    Debug = 200,
    Performance = 300,
    #[default]
    Info = 400,
    Warning = 500,
    Error = 600,
}

impl LogLevel {
    /// The integer rank of this level
    pub const fn rank(self) -> Rank {
        self as Rank
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Performance => "PERFORMANCE",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// All levels, most verbose first
    pub const fn all() -> [LogLevel; 6] {
        [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Performance,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
        ]
    }
}

impl From<LogLevel> for Rank {
    fn from(level: LogLevel) -> Rank {
        level.rank()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "PERF" | "PERFORMANCE" => Ok(LogLevel::Performance),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering_and_gaps() {
        let levels = LogLevel::all();
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[1].rank() - pair[0].rank() >= 100);
        }
    }

    #[test]
    fn test_sentinels_bracket_all_levels() {
        for level in LogLevel::all() {
            assert!(ALL < level.rank());
            assert!(OFF > level.rank());
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for level in LogLevel::all() {
            let parsed: LogLevel = level.to_str().parse().unwrap();
            assert_eq!(level, parsed);
        }
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert!("bogus".parse::<LogLevel>().is_err());
    }
}
