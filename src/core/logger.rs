//! Hierarchical logger tree
//!
//! Loggers form a process-wide tree rooted at the empty-name node.
//! Nodes are created lazily on first lookup and live for the rest of
//! the process. A new child snapshots its parent's level at creation
//! time; only an explicit [`Logger::set_child_loggers_level`] cascade
//! re-synchronizes an existing subtree.

use super::error::{LoggerError, Result};
use super::log_level::{LogLevel, Rank};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, OnceLock};

pub(crate) struct LoggerNode {
    name: String,
    level: AtomicI32,
    children: RwLock<HashMap<String, Arc<LoggerNode>>>,
}

impl LoggerNode {
    fn new(name: String, level: Rank) -> Self {
        Self {
            name,
            level: AtomicI32::new(level),
            children: RwLock::new(HashMap::new()),
        }
    }
}

/// Handle to one node of the logger tree. Cheap to clone; all clones
/// share the node's state.
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
}

static ROOT: OnceLock<Arc<LoggerNode>> = OnceLock::new();

fn root_node() -> &'static Arc<LoggerNode> {
    ROOT.get_or_init(|| Arc::new(LoggerNode::new(String::new(), LogLevel::Info.rank())))
}

/// The root logger (empty name)
pub fn root_logger() -> Logger {
    Logger {
        node: Arc::clone(root_node()),
    }
}

/// Resolve a dotted path from the root, creating missing nodes.
///
/// `logger("")` returns the root itself.
pub fn logger(path: &str) -> Result<Logger> {
    root_logger().child_logger(path)
}

/// Test-support reset: drops every logger below the root and restores
/// the root level to `Info`. Registered handlers are unaffected.
pub fn reset() {
    let root = root_node();
    root.children.write().clear();
    root.level.store(LogLevel::Info.rank(), Ordering::Relaxed);
}

impl Logger {
    /// Fully-qualified dotted name; empty for the root
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Current severity threshold rank
    pub fn level(&self) -> Rank {
        self.node.level.load(Ordering::Relaxed)
    }

    /// Set this node's severity threshold. Accepts a [`LogLevel`] or a
    /// raw rank (including the [`ALL`](super::log_level::ALL) and
    /// [`OFF`](super::log_level::OFF) sentinels).
    pub fn set_level(&self, level: impl Into<Rank>) {
        self.node.level.store(level.into(), Ordering::Relaxed);
    }

    /// Resolve a dotted path relative to this node, creating missing
    /// segments. An empty path returns this node. An empty path
    /// segment fails with [`LoggerError::InvalidName`].
    pub fn child_logger(&self, path: &str) -> Result<Logger> {
        if path.is_empty() {
            return Ok(self.clone());
        }
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(LoggerError::invalid_name(path));
        }
        let mut node = Arc::clone(&self.node);
        for segment in segments {
            node = child_node(&node, segment);
        }
        Ok(Logger { node })
    }

    /// Direct children of this node, in no particular order
    pub fn child_loggers(&self) -> Vec<Logger> {
        self.node
            .children
            .read()
            .values()
            .map(|node| Logger {
                node: Arc::clone(node),
            })
            .collect()
    }

    /// Set this node's level and recursively every descendant's level
    /// to the same value. Returns the node for chaining. Nodes created
    /// after this call still snapshot their parent's level as usual.
    pub fn set_child_loggers_level(&self, level: impl Into<Rank>) -> Logger {
        cascade(&self.node, level.into());
        self.clone()
    }
}

fn child_node(parent: &Arc<LoggerNode>, segment: &str) -> Arc<LoggerNode> {
    if let Some(child) = parent.children.read().get(segment) {
        return Arc::clone(child);
    }
    let mut children = parent.children.write();
    // re-check under the write lock
    let child = children.entry(segment.to_string()).or_insert_with(|| {
        let name = if parent.name.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", parent.name, segment)
        };
        Arc::new(LoggerNode::new(name, parent.level.load(Ordering::Relaxed)))
    });
    Arc::clone(child)
}

fn cascade(node: &Arc<LoggerNode>, rank: Rank) {
    node.level.store(rank, Ordering::Relaxed);
    let children: Vec<Arc<LoggerNode>> = node.children.read().values().cloned().collect();
    for child in children {
        cascade(&child, rank);
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.node.name)
            .field("level", &self.level())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::{ALL, OFF};

    #[test]
    fn test_root_lookup_is_idempotent() {
        let root = root_logger();
        assert_eq!(root.name(), "");
        assert_eq!(root.child_logger("").unwrap(), root);
        assert_eq!(logger("").unwrap(), root);
    }

    #[test]
    fn test_lazy_creation_and_qualified_names() {
        let leaf = logger("tree_a.server.pool").unwrap();
        assert_eq!(leaf.name(), "tree_a.server.pool");

        let mid = logger("tree_a.server").unwrap();
        assert_eq!(mid.child_logger("pool").unwrap(), leaf);
        assert!(mid.child_loggers().contains(&leaf));
    }

    #[test]
    fn test_same_leaf_different_parents_are_distinct() {
        let first = logger("tree_b.alpha.worker").unwrap();
        let second = logger("tree_b.beta.worker").unwrap();
        assert_ne!(first, second);
        assert_eq!(first.name(), "tree_b.alpha.worker");
        assert_eq!(second.name(), "tree_b.beta.worker");
    }

    #[test]
    fn test_empty_segment_is_rejected() {
        assert!(matches!(
            logger("tree_c..child"),
            Err(LoggerError::InvalidName { .. })
        ));
        assert!(matches!(
            logger("tree_c."),
            Err(LoggerError::InvalidName { .. })
        ));
        assert!(matches!(
            logger(".tree_c"),
            Err(LoggerError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_child_snapshots_parent_level_at_creation() {
        let parent = logger("tree_d.parent").unwrap();
        parent.set_level(LogLevel::Trace);

        let child = parent.child_logger("early").unwrap();
        assert_eq!(child.level(), LogLevel::Trace.rank());

        // Changing the parent afterwards does not re-sync the child
        parent.set_level(LogLevel::Error);
        assert_eq!(child.level(), LogLevel::Trace.rank());

        // But a node created now sees the parent's current level
        let late = parent.child_logger("late").unwrap();
        assert_eq!(late.level(), LogLevel::Error.rank());
    }

    #[test]
    fn test_cascade_overwrites_existing_descendants() {
        let base = logger("tree_e").unwrap();
        let child = logger("tree_e.child").unwrap();
        let grandchild = logger("tree_e.child.grandchild").unwrap();
        child.set_level(LogLevel::Error);

        let chained = base.set_child_loggers_level(LogLevel::Debug);
        assert_eq!(chained, base);
        assert_eq!(base.level(), LogLevel::Debug.rank());
        assert_eq!(child.level(), LogLevel::Debug.rank());
        assert_eq!(grandchild.level(), LogLevel::Debug.rank());
    }

    #[test]
    fn test_sentinel_levels() {
        let quiet = logger("tree_f.quiet").unwrap();
        quiet.set_level(OFF);
        assert!(!quiet.enabled(LogLevel::Error));

        let chatty = logger("tree_f.chatty").unwrap();
        chatty.set_level(ALL);
        assert!(chatty.enabled(LogLevel::Trace));
    }

    #[test]
    fn test_rank_arithmetic_against_thresholds() {
        let node = logger("tree_g.arith").unwrap();
        node.set_level(LogLevel::Info.rank() - 100);
        assert!(node.enabled(LogLevel::Info));
        assert!(node.enabled(LogLevel::Performance));
        assert!(!node.enabled(LogLevel::Debug));
    }
}
