//! Testing support for story map assertions
//!
//!     Integration tests verify parsed structure through a small fluent
//!     facade instead of reaching into node fields ad hoc. Assertions panic
//!     with the offending id in the message, which keeps test failures
//!     readable without any custom matcher plumbing.
//!
//!     Entry point is [assert_map]; per-node checks chain on [NodeAssert].

use crate::usm::node::{Node, NodeType, StoryMap};

/// Start a fluent assertion chain over a parsed map.
pub fn assert_map(map: &StoryMap) -> MapAssert<'_> {
    MapAssert { map }
}

pub struct MapAssert<'a> {
    map: &'a StoryMap,
}

impl<'a> MapAssert<'a> {
    pub fn node_count(self, expected: usize) -> Self {
        assert_eq!(
            self.map.len(),
            expected,
            "expected {} nodes, found {}",
            expected,
            self.map.len()
        );
        self
    }

    pub fn root_count(self, expected: usize) -> Self {
        let found = self.map.roots().count();
        assert_eq!(found, expected, "expected {} roots, found {}", expected, found);
        self
    }

    pub fn node(self, id: &str, check: impl FnOnce(NodeAssert<'_>)) -> Self {
        let node = self
            .map
            .get(id)
            .unwrap_or_else(|| panic!("no node with id `{}`", id));
        check(NodeAssert { node });
        self
    }
}

pub struct NodeAssert<'a> {
    node: &'a Node,
}

impl<'a> NodeAssert<'a> {
    pub fn title(self, expected: &str) -> Self {
        assert_eq!(self.node.title, expected, "title of `{}`", self.node.node_id);
        self
    }

    pub fn node_type(self, expected: NodeType) -> Self {
        assert_eq!(
            self.node.node_type, expected,
            "node type of `{}`",
            self.node.node_id
        );
        self
    }

    pub fn level(self, expected: usize) -> Self {
        assert_eq!(self.node.level, expected, "level of `{}`", self.node.node_id);
        self
    }

    pub fn parent(self, expected: &str) -> Self {
        assert_eq!(
            self.node.parent_id.as_deref(),
            Some(expected),
            "parent of `{}`",
            self.node.node_id
        );
        self
    }

    pub fn no_parent(self) -> Self {
        assert_eq!(
            self.node.parent_id, None,
            "`{}` should have no parent",
            self.node.node_id
        );
        self
    }

    pub fn children(self, expected: &[&str]) -> Self {
        let found: Vec<&str> = self.node.children_ids.iter().map(String::as_str).collect();
        assert_eq!(found, expected, "children of `{}`", self.node.node_id);
        self
    }

    pub fn description(self, expected: &str) -> Self {
        assert_eq!(
            self.node.description.as_deref(),
            Some(expected),
            "description of `{}`",
            self.node.node_id
        );
        self
    }

    pub fn related(self, expected: &[&str]) -> Self {
        let found: Vec<&str> = self.node.related_ids.iter().map(String::as_str).collect();
        assert_eq!(found, expected, "related ids of `{}`", self.node.node_id);
        self
    }
}
