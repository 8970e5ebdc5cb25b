//! Post-parse semantic validation
//!
//!     The parser is deliberately permissive: it only rejects what makes the
//!     line stream unparseable. Whole-node rules live here, after the tree
//!     is complete, so a caller gets either a line-level syntax report or a
//!     node-level semantic report. The first violation wins, in check order.

use crate::usm::error::{ParseError, ParseResult};
use crate::usm::node::{NodeType, StoryMap};

/// Enforce tree-shape and required-field rules on a parsed map.
///
/// Checks, in order: stories are leaves, titles are non-empty. Errors point
/// at the offending node's declaration line.
pub fn validate(map: &StoryMap) -> ParseResult<()> {
    for node in map.iter() {
        if node.node_type == NodeType::UserStory && !node.children_ids.is_empty() {
            return Err(ParseError::new(
                node.line,
                format!("story `{}` cannot have child nodes", node.node_id),
            ));
        }
    }

    for node in map.iter() {
        if node.title.is_empty() {
            return Err(ParseError::new(
                node.line,
                format!("node `{}` has an empty title", node.node_id),
            ));
        }
    }

    Ok(())
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
    fn test_story_with_children_is_rejected() {
        let map = parsed("root: A\n  [@s] story: B\n    story: C\n");
        let err = validate(&map).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("`s`"));
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let map = parsed("root:\n");
        let err = validate(&map).unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("empty title"));
    }

    #[test]
    fn test_leaf_check_runs_before_title_check() {
        // Both defects present; the story-with-children one must win.
        let map = parsed("root:\n  [@s] story: B\n    story: C\n");
        let err = validate(&map).unwrap_err();
        assert!(err.message.contains("child nodes"));
    }

    #[test]
    fn test_well_formed_map_passes() {
        let map = parsed("root: A\n  feature: B\n    story: C\n");
        assert!(validate(&map).is_ok());
    }
}
