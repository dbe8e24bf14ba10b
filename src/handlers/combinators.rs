//! Handler composition utilities
//!
//! Each combinator wraps an existing handler into a new one: filter by
//! level threshold, filter by logger name or pattern, hand off to a
//! worker thread, or capture into a bounded ring buffer.

use super::{handler, LogHandler};
use crate::core::log_level::Rank;
use crate::core::log_record::LogRecord;
use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};
use std::thread;

/// Forward to `inner` only records at or above `threshold`
pub fn from_level(threshold: impl Into<Rank>, inner: LogHandler) -> LogHandler {
    let threshold = threshold.into();
    handler(move |record| {
        if record.level.rank() >= threshold {
            inner(record);
        }
    })
}

/// Selects loggers for [`for_logger`]: a literal name matches the named
/// logger and its subtree, a pattern matches anywhere in the name.
#[derive(Debug, Clone)]
pub enum LoggerSelector {
    Name(String),
    Pattern(Regex),
}

impl LoggerSelector {
    fn matches(&self, logger: &str) -> bool {
        match self {
            LoggerSelector::Name(name) => {
                logger == name
                    || (logger.len() > name.len()
                        && logger.starts_with(name.as_str())
                        && logger.as_bytes()[name.len()] == b'.')
            }
            LoggerSelector::Pattern(pattern) => pattern.is_match(logger),
        }
    }
}

impl From<&str> for LoggerSelector {
    fn from(name: &str) -> Self {
        LoggerSelector::Name(name.to_string())
    }
}

impl From<String> for LoggerSelector {
    fn from(name: String) -> Self {
        LoggerSelector::Name(name)
    }
}

impl From<Regex> for LoggerSelector {
    fn from(pattern: Regex) -> Self {
        LoggerSelector::Pattern(pattern)
    }
}

/// Forward to `inner` only records whose logger matches `selector`.
/// A literal name matches exactly that logger and its subtree, never a
/// sibling sharing the name as a prefix.
pub fn for_logger(selector: impl Into<LoggerSelector>, inner: LogHandler) -> LogHandler {
    let selector = selector.into();
    handler(move |record| {
        if selector.matches(&record.logger) {
            inner(record);
        }
    })
}

struct DeferredJob {
    handler: LogHandler,
    record: LogRecord,
}

// One shared worker drains every deferred handler, so dispatch order is
// preserved across all of them. The worker lives for the process, like
// the logger tree itself.
static DEFERRED_QUEUE: OnceLock<Sender<DeferredJob>> = OnceLock::new();

fn deferred_sender() -> &'static Sender<DeferredJob> {
    DEFERRED_QUEUE.get_or_init(|| {
        let (sender, receiver) = unbounded::<DeferredJob>();
        thread::spawn(move || {
            for job in receiver {
                (job.handler)(&job.record);
            }
        });
        sender
    })
}

/// Hand each record off to `inner` on the shared deferral worker.
///
/// The caller never blocks on `inner`. Records forwarded through any
/// deferred handler reach their targets in original dispatch order.
/// There is no cancellation: a record handed off will eventually be
/// processed.
pub fn deferred(inner: LogHandler) -> LogHandler {
    handler(move |record| {
        let job = DeferredJob {
            handler: Arc::clone(&inner),
            record: record.clone(),
        };
        let _ = deferred_sender().send(job);
    })
}

pub const DEFAULT_RING_BUFFER_SIZE: usize = 100;

/// Fixed-capacity collection retaining only the most recent items
#[derive(Debug, Clone)]
pub struct RingBuffer<V> {
    items: VecDeque<V>,
    max_size: usize,
}

impl<V> RingBuffer<V> {
    pub fn new(max_size: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Append, evicting the oldest item once at capacity
    pub fn push(&mut self, value: V) {
        if self.max_size == 0 {
            return;
        }
        if self.items.len() == self.max_size {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    /// Number of currently held items, never above the capacity
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Held items oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.items.iter()
    }
}

/// A handler-shaped capture into a bounded ring of recent records
#[derive(Clone)]
pub struct RingBufferHandler {
    buffer: Arc<Mutex<RingBuffer<LogRecord>>>,
}

impl RingBufferHandler {
    pub fn new(max_size: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(RingBuffer::new(max_size))),
        }
    }

    /// The registrable handler backed by this buffer
    pub fn handler(&self) -> LogHandler {
        let buffer = Arc::clone(&self.buffer);
        handler(move |record| {
            buffer.lock().push(record.clone());
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Currently held records, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.buffer.lock().iter().cloned().collect()
    }
}

impl Default for RingBufferHandler {
    fn default() -> Self {
        Self::new(DEFAULT_RING_BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::log_record::LazyMessage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn record(logger: &str, level: LogLevel) -> LogRecord {
        LogRecord::new(logger, level, None, LazyMessage::eager("m"))
    }

    fn counting() -> (LogHandler, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let h = handler(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (h, count)
    }

    #[test]
    fn test_from_level_threshold() {
        let (inner, count) = counting();
        let filtered = from_level(LogLevel::Warning, inner);

        filtered(&record("a", LogLevel::Info));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        filtered(&record("a", LogLevel::Warning));
        filtered(&record("a", LogLevel::Error));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_for_logger_subtree_not_sibling_prefix() {
        let (inner, count) = counting();
        let scoped = for_logger("base.child", inner);

        scoped(&record("base", LogLevel::Info));
        scoped(&record("base.childSuffix", LogLevel::Info));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        scoped(&record("base.child", LogLevel::Info));
        scoped(&record("base.child.grandchild", LogLevel::Info));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_for_logger_pattern_matches_anywhere() {
        let (inner, count) = counting();
        let scoped = for_logger(Regex::new("child").unwrap(), inner);

        scoped(&record("base.child", LogLevel::Info));
        scoped(&record("base.childSuffix", LogLevel::Info));
        scoped(&record("base", LogLevel::Info));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_deferred_preserves_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let wrapped = deferred(handler(move |record| {
            sink.lock().push(record.logger.clone());
        }));

        for i in 0..20 {
            wrapped(&record(&format!("async.{}", i), LogLevel::Info));
        }

        // Give the worker time to drain
        for _ in 0..50 {
            if seen.lock().len() == 20 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        let order: Vec<String> = seen.lock().clone();
        let expected: Vec<String> = (0..20).map(|i| format!("async.{}", i)).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_deferred_preserves_order_across_handlers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_a = Arc::clone(&seen);
        let sink_b = Arc::clone(&seen);
        let first = deferred(handler(move |record| {
            sink_a.lock().push(format!("a:{}", record.logger));
        }));
        let second = deferred(handler(move |record| {
            sink_b.lock().push(format!("b:{}", record.logger));
        }));

        for i in 0..5 {
            let r = record(&format!("x{}", i), LogLevel::Info);
            first(&r);
            second(&r);
        }

        for _ in 0..100 {
            if seen.lock().len() == 10 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        let order: Vec<String> = seen.lock().clone();
        let expected: Vec<String> = (0..5)
            .flat_map(|i| [format!("a:x{}", i), format!("b:x{}", i)])
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_ring_buffer_under_capacity() {
        let mut ring = RingBuffer::new(5);
        for i in 0..3 {
            ring.push(i);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_ring_buffer_overwrites_oldest() {
        let mut ring = RingBuffer::new(3);
        for i in 0..10 {
            ring.push(i);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]);
    }

    #[test]
    fn test_ring_buffer_handler_caps_records() {
        let ring = RingBufferHandler::new(2);
        let h = ring.handler();
        for i in 0..5 {
            h(&record(&format!("ring.{}", i), LogLevel::Info));
        }
        assert_eq!(ring.len(), 2);
        let names: Vec<String> = ring.records().iter().map(|r| r.logger.clone()).collect();
        assert_eq!(names, vec!["ring.3", "ring.4"]);
    }
}
