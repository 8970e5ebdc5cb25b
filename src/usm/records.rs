//! Persisted node records
//!
//!     The storage layer keeps nodes as flat rows, each tagged with the
//!     identifier of the map that owns it. Converting a parsed map into that
//!     shape is a pure field mapping with no validation; the records are
//!     also the exporter's input, so a document can be reconstructed from
//!     storage alone without ever touching parser-internal types.

use serde::{Deserialize, Serialize};

use crate::usm::node::{Node, NodeType, StoryMap};

/// The storage shape of one node, with its owning map attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub map_id: String,
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
    pub level: usize,
    pub position_x: i64,
    pub position_y: i64,
    pub aggregated_tickets: Vec<String>,
}

impl NodeRecord {
    fn from_node(node: &Node, map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
            node_id: node.node_id.clone(),
            title: node.title.clone(),
            node_type: node.node_type,
            description: node.description.clone(),
            comment: node.comment.clone(),
            product: node.product.clone(),
            team: node.team.clone(),
            as_a: node.as_a.clone(),
            i_want: node.i_want.clone(),
            so_that: node.so_that.clone(),
            jira_tickets: node.jira_tickets.clone(),
            team_tags: node.team_tags.clone(),
            related_ids: node.related_ids.clone(),
            parent_id: node.parent_id.clone(),
            children_ids: node.children_ids.clone(),
            level: node.level,
            position_x: node.position_x,
            position_y: node.position_y,
            aggregated_tickets: node.aggregated_tickets.clone(),
        }
    }
}

/// Attach a map identifier to every parsed node for storage.
///
/// Pure mapping in document order; no validation happens here.
pub fn to_persisted_shape(map: &StoryMap, map_id: &str) -> Vec<NodeRecord> {
    map.iter()
        .map(|node| NodeRecord::from_node(node, map_id))
        .collect()
}

/// Render records as pretty-printed JSON.
pub fn records_to_json(records: &[NodeRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
