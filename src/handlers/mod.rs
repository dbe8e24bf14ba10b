//! Handler registry and composition utilities
//!
//! Handlers are plain functions consuming records. The process keeps
//! one ordered list of active handlers; dispatch walks it in
//! registration order. Identity is pointer identity of the shared
//! closure, so registering the same handler twice is a no-op.

pub mod combinators;
pub mod console;

pub use combinators::{
    deferred, for_logger, from_level, LoggerSelector, RingBuffer, RingBufferHandler,
    DEFAULT_RING_BUFFER_SIZE,
};
pub use console::console_handler;

use crate::core::log_record::LogRecord;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A function consuming log records. Handlers must not mutate the
/// record or retain references past their own synchronous processing.
pub type LogHandler = Arc<dyn Fn(&LogRecord) + Send + Sync>;

static HANDLERS: RwLock<Vec<LogHandler>> = RwLock::new(Vec::new());

/// Wrap a closure into a registrable handler value
pub fn handler(f: impl Fn(&LogRecord) + Send + Sync + 'static) -> LogHandler {
    Arc::new(f)
}

/// Append `handler` to the active list unless it is already present
pub fn register_log_handler(handler: &LogHandler) {
    let mut handlers = HANDLERS.write();
    if !handlers.iter().any(|h| Arc::ptr_eq(h, handler)) {
        handlers.push(Arc::clone(handler));
    }
}

/// Remove `handler` from the active list; no-op when absent
pub fn unregister_log_handler(handler: &LogHandler) {
    HANDLERS.write().retain(|h| !Arc::ptr_eq(h, handler));
}

/// Snapshot of the active handlers in registration order
pub(crate) fn active_handlers() -> Vec<LogHandler> {
    HANDLERS.read().clone()
}

/// An in-flight capture created by [`capture_logging`]. Holds the
/// records seen while active and the handler set to put back.
pub struct Capture {
    records: Arc<Mutex<Vec<LogRecord>>>,
    capturing: LogHandler,
    saved: Vec<LogHandler>,
}

/// Atomically swap all active handlers for a single capturing handler.
///
/// Until [`Capture::restore`] runs, every dispatched record lands in
/// the capture's record list instead of the previous handlers. Captures
/// nest: each call site saves and restores its own handler set.
pub fn capture_logging() -> Capture {
    let records = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&records);
    let capturing: LogHandler = Arc::new(move |record: &LogRecord| {
        sink.lock().push(record.clone());
    });
    let saved = {
        let mut handlers = HANDLERS.write();
        std::mem::replace(&mut *handlers, vec![Arc::clone(&capturing)])
    };
    Capture {
        records,
        capturing,
        saved,
    }
}

impl Capture {
    /// The records captured so far, in dispatch order
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove the capturing handler and re-register the handlers that
    /// were active when the capture started, in their original order
    pub fn restore(self) {
        let mut handlers = HANDLERS.write();
        handlers.retain(|h| !Arc::ptr_eq(h, &self.capturing));
        for saved in &self.saved {
            if !handlers.iter().any(|h| Arc::ptr_eq(h, saved)) {
                handlers.push(Arc::clone(saved));
            }
        }
    }
}
