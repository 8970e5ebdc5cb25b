//! Integration tests for identifier allocation and uniqueness

use std::collections::HashSet;

use usm::usm::pipeline::parse_document;

#[test]
fn test_explicit_ids_are_used_verbatim() {
    let map = parse_document("[@my-root] root: A\n  [@story.1] story: B\n").unwrap();
    assert!(map.contains("my-root"));
    assert!(map.contains("story.1"));
}

#[test]
fn test_duplicate_explicit_id_is_a_parse_error() {
    let err = parse_document("[@a] root: A\n  [@a] feature: B\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.message.contains("duplicate"));
    assert!(err.message.contains("`a`"));
}

#[test]
fn test_duplicate_across_subtrees_is_still_an_error() {
    let source = "[@r] root: A\n  [@x] feature: B\n  [@y] feature: C\n    [@x] story: D\n";
    let err = parse_document(source).unwrap_err();
    assert_eq!(err.line, 4);
}

#[test]
fn test_mixed_explicit_and_auto_ids_coexist() {
    let map = parse_document("[@r] root: A\n  feature: B\n  [@f] feature: C\n").unwrap();

    let ids: HashSet<&str> = map.iter().map(|n| n.node_id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains("r"));
    assert!(ids.contains("f"));
}

#[test]
fn test_burst_of_auto_ids_stays_unique() {
    // 1000 nodes without explicit ids in one parse call must yield 1000
    // distinct identifiers, however fast they are created.
    let mut source = String::from("root: Big\n");
    for i in 0..999 {
        source.push_str(&format!("  story: Story {}\n", i));
    }
    let map = parse_document(&source).unwrap();

    let ids: HashSet<&str> = map.iter().map(|n| n.node_id.as_str()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn test_auto_id_prefixes_by_node_type() {
    let map = parse_document("root: A\n  feature: B\n    story: C\n").unwrap();

    for node in map.iter() {
        match node.level {
            0 => assert!(node.node_id.starts_with("root_")),
            _ => assert!(node.node_id.starts_with("node_")),
        }
    }
}
