//! Story map nodes and the parsed-map arena
//!
//!     A parsed document is a flat arena of nodes keyed by identifier, never
//!     a recursive ownership tree. Parent and children are stored as id
//!     references, which keeps the whole structure trivially serializable
//!     and sidesteps cyclic-ownership concerns entirely.
//!
//!     Node creation happens exclusively during one parse pass; the arena is
//!     then handed read-only to persistence. The identifier index lives next
//!     to the node vector and is private to the map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The closed set of node kinds the format recognizes.
///
/// Any other keyword on a would-be declaration line demotes that line to a
/// property line; the set is not extensible from source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Root,
    FeatureCategory,
    UserStory,
}

impl NodeType {
    /// Map a declaration keyword to its node type.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "root" => Some(NodeType::Root),
            "feature" => Some(NodeType::FeatureCategory),
            "story" => Some(NodeType::UserStory),
            _ => None,
        }
    }

    /// The declaration keyword this type is written as.
    pub fn keyword(&self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::FeatureCategory => "feature",
            NodeType::UserStory => "story",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// One story map node as produced by the parser.
///
/// Scalar fields are None until a property line sets them; list fields keep
/// their source order verbatim and are not deduplicated at parse time.
/// `aggregated_tickets` is reserved for downstream aggregation and is never
/// touched here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: String,
    pub title: String,
    pub node_type: NodeType,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub product: Option<String>,
    pub team: Option<String>,
    pub as_a: Option<String>,
    pub i_want: Option<String>,
    pub so_that: Option<String>,
    pub jira_tickets: Vec<String>,
    pub team_tags: Vec<String>,
    pub related_ids: Vec<String>,
    pub parent_id: Option<String>,
    pub children_ids: Vec<String>,
    /// 0-based depth, derived from indentation
    pub level: usize,
    pub position_x: i64,
    pub position_y: i64,
    pub aggregated_tickets: Vec<String>,
    /// Source line of the declaration; parse-time metadata, not persisted
    #[serde(skip)]
    pub line: usize,
}

impl Node {
    pub fn new(
        node_id: String,
        node_type: NodeType,
        title: String,
        level: usize,
        line: usize,
    ) -> Self {
        Self {
            node_id,
            title,
            node_type,
            description: None,
            comment: None,
            product: None,
            team: None,
            as_a: None,
            i_want: None,
            so_that: None,
            jira_tickets: Vec::new(),
            team_tags: Vec::new(),
            related_ids: Vec::new(),
            parent_id: None,
            children_ids: Vec::new(),
            level,
            position_x: 0,
            position_y: 0,
            aggregated_tickets: Vec::new(),
            line,
        }
    }
}

/// The parse result: an ordered node collection plus an identifier index.
///
/// Nodes keep document order; the index maps each `node_id` to its position
/// in that order. Both are owned exclusively by one parse invocation.
#[derive(Debug, Clone, Default)]
pub struct StoryMap {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl StoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node whose id the caller has already established as unused.
    pub(crate) fn push(&mut self, node: Node) -> usize {
        debug_assert!(
            !self.index.contains_key(&node.node_id),
            "id `{}` inserted twice",
            node.node_id
        );
        let idx = self.nodes.len();
        self.index.insert(node.node_id.clone(), idx);
        self.nodes.push(node);
        idx
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|idx| &self.nodes[*idx])
    }

    /// Iterate nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate nodes without a parent, in document order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.parent_id.is_none())
    }

    /// A node's children in their stored order.
    ///
    /// Ids that resolve to no node are skipped; a parsed map never produces
    /// them, but hand-built maps may.
    pub fn children_of(&self, id: &str) -> Vec<&Node> {
        match self.get(id) {
            Some(node) => node
                .children_ids
                .iter()
                .filter_map(|child_id| self.get(child_id))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn find_nodes<F>(&self, predicate: F) -> Vec<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        self.nodes.iter().filter(|n| predicate(n)).collect()
    }
}
