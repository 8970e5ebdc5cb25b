//! Relation resolution
//!
//!     `related` properties may reference nodes that were renamed or deleted
//!     while the user edited the document. Those dangling entries are an
//!     editing artifact, not a structural defect, so resolution silently
//!     drops them instead of erroring. Surviving entries keep their order.

use crate::usm::node::StoryMap;
use std::collections::HashSet;

/// Drop every `related_ids` entry that names no node in the map.
pub fn resolve_relations(map: &mut StoryMap) {
    let known: HashSet<String> = map.iter().map(|n| n.node_id.clone()).collect();
    for node in map.iter_mut() {
        node.related_ids.retain(|id| known.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usm::lines::preprocess;
    use crate::usm::parser::parse_lines;

    fn parsed(source: &str) -> StoryMap {
        parse_lines(&preprocess(source)).unwrap()
    }

    #[test]
    fn test_dangling_references_are_dropped() {
        let mut map = parsed("[@r] root: A\n  [@s] story: B\n    related: @ghost\n");
        resolve_relations(&mut map);
        assert!(map.get("s").unwrap().related_ids.is_empty());
    }

    #[test]
    fn test_surviving_references_keep_their_order() {
        let source = "[@r] root: A\n  [@a] story: B\n  [@b] story: C\n    related: @b, @ghost, @a\n";
        let mut map = parsed(source);
        resolve_relations(&mut map);
        assert_eq!(map.get("b").unwrap().related_ids, vec!["b", "a"]);
    }

    #[test]
    fn test_forward_references_resolve() {
        // `related` may name a node declared later in the document.
        let source = "[@r] root: A\n  [@a] story: B\n    related: @z\n  [@z] story: C\n";
        let mut map = parsed(source);
        resolve_relations(&mut map);
        assert_eq!(map.get("a").unwrap().related_ids, vec!["z"]);
    }
}
