//! Treeviz rendering for story maps
//!
//!     Treeviz is a one-line-per-node visual representation of a parsed map,
//!     meant for quick scanning while debugging imports. Nesting is encoded
//!     as indentation with 2 spaces per level, each line being
//!     `<icon><space><title>` with the title truncated to 30 characters.
//!
//! Icons
//!
//!         Root: ⧉
//!         FeatureCategory: §
//!         UserStory: ¶

use crate::usm::node::{Node, NodeType, StoryMap};

const TITLE_MAX_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Root => "⧉",
        NodeType::FeatureCategory => "§",
        NodeType::UserStory => "¶",
    }
}

/// Render a story map as an indented one-line-per-node tree.
pub fn to_treeviz_str(map: &StoryMap) -> String {
    let mut output = String::new();
    for root in map.roots() {
        render(map, root, 0, &mut output);
    }
    output
}

fn render(map: &StoryMap, node: &Node, depth: usize, output: &mut String) {
    output.push_str(&"  ".repeat(depth));
    output.push_str(icon(node.node_type));
    output.push(' ');
    output.push_str(&truncate(&node.title, TITLE_MAX_CHARS));
    output.push('\n');
    for child_id in &node.children_ids {
        if let Some(child) = map.get(child_id) {
            render(map, child, depth + 1, output);
        }
    }
}
