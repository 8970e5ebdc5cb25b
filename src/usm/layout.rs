//! Placeholder layout for freshly parsed maps
//!
//!     Every node gets a deterministic starting position so an importing UI
//!     has something to render before its own layout runs. The position is a
//!     pure function of the node's level and of how many nodes at that level
//!     came before it in document order; identical input always produces the
//!     identical layout, and nothing downstream depends on it semantically.

use crate::usm::node::StoryMap;
use std::collections::HashMap;

pub const BASE_X: i64 = 100;
pub const LEVEL_X_STEP: i64 = 300;
pub const BASE_Y: i64 = 100;
pub const SIBLING_Y_STEP: i64 = 150;

/// Assign placeholder coordinates to every node, in document order.
pub fn assign_positions(map: &mut StoryMap) {
    let mut per_level: HashMap<usize, i64> = HashMap::new();
    for node in map.iter_mut() {
        let ordinal = per_level.entry(node.level).or_insert(0);
        node.position_x = BASE_X + node.level as i64 * LEVEL_X_STEP;
        node.position_y = BASE_Y + *ordinal * SIBLING_Y_STEP;
        *ordinal += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usm::lines::preprocess;
    use crate::usm::parser::parse_lines;

    fn positioned(source: &str) -> StoryMap {
        let mut map = parse_lines(&preprocess(source)).unwrap();
        assign_positions(&mut map);
        map
    }

    #[test]
    fn test_x_advances_per_level() {
        let map = positioned("[@r] root: A\n  [@f] feature: B\n    [@s] story: C\n");
        assert_eq!(map.get("r").unwrap().position_x, BASE_X);
        assert_eq!(map.get("f").unwrap().position_x, BASE_X + LEVEL_X_STEP);
        assert_eq!(map.get("s").unwrap().position_x, BASE_X + 2 * LEVEL_X_STEP);
    }

    #[test]
    fn test_y_advances_per_level_ordinal() {
        let map = positioned("[@r] root: A\n  [@f1] feature: B\n  [@f2] feature: C\n");
        assert_eq!(map.get("f1").unwrap().position_y, BASE_Y);
        assert_eq!(map.get("f2").unwrap().position_y, BASE_Y + SIBLING_Y_STEP);
    }

    #[test]
    fn test_layout_is_reproducible() {
        let source = "[@r] root: A\n  [@f] feature: B\n    [@s1] story: C\n    [@s2] story: D\n";
        let first = positioned(source);
        let second = positioned(source);
        for node in first.iter() {
            let other = second.get(&node.node_id).unwrap();
            assert_eq!((node.position_x, node.position_y), (other.position_x, other.position_y));
        }
    }
}
