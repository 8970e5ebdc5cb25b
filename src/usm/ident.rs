//! Identifier allocation for story map nodes
//!
//!     Explicit identifiers arrive through the [@id] declaration prefix and
//!     only need a uniqueness check. Auto-generated identifiers fuse a
//!     per-parse monotonic counter with random bits: the counter guarantees
//!     distinctness however many nodes one parse creates, the entropy keeps
//!     ids from different parse runs apart when documents are later merged.
//!     Wall-clock time is never part of an identifier.
//!
//!     The allocator holds no identifier set of its own; callers supply a
//!     membership check against the parse-local index, and candidates that
//!     are already taken are simply re-drawn.

use crate::usm::node::NodeType;
use rand::Rng;

/// Per-parse identifier generator.
pub struct IdAllocator {
    seq: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { seq: 0 }
    }

    /// Allocate a fresh identifier for which `is_taken` returns false.
    ///
    /// Root nodes get `root_<hex>`, everything else `node_<seq>_<hex>`.
    pub fn allocate<F>(&mut self, node_type: NodeType, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut rng = rand::thread_rng();
        loop {
            self.seq += 1;
            let candidate = match node_type {
                NodeType::Root => format!("root_{:08x}", rng.gen::<u32>()),
                _ => format!("node_{}_{:04x}", self.seq, rng.gen::<u16>()),
            };
            if !is_taken(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prefix_convention() {
        let mut alloc = IdAllocator::new();
        assert!(alloc.allocate(NodeType::Root, |_| false).starts_with("root_"));
        assert!(alloc
            .allocate(NodeType::FeatureCategory, |_| false)
            .starts_with("node_"));
        assert!(alloc
            .allocate(NodeType::UserStory, |_| false)
            .starts_with("node_"));
    }

    #[test]
    fn test_burst_allocation_stays_unique() {
        let mut alloc = IdAllocator::new();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = alloc.allocate(NodeType::UserStory, |candidate| seen.contains(candidate));
            assert!(seen.insert(id));
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_taken_candidates_are_redrawn() {
        let mut alloc = IdAllocator::new();
        // Reject every candidate carrying the first counter value; the
        // allocator must advance rather than loop on the same id.
        let id = alloc.allocate(NodeType::UserStory, |candidate| {
            candidate.starts_with("node_1_")
        });
        assert!(id.starts_with("node_2_"));
    }
}
