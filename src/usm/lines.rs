//! Line preprocessing for the USM format
//!
//!     The USM grammar is line oriented: every construct occupies exactly one
//!     physical line, and nesting is carried by indentation alone. Before any
//!     parsing happens, raw text is normalized into typed Line values so the
//!     parser never has to reason about tabs, comments or blank lines.
//!
//!     Comments (lines whose trimmed content starts with #) and blank lines
//!     are dropped entirely here. They are not kept as markers, which means
//!     they can never influence the indentation stack downstream.
//!
//! Indent unit detection
//!
//!     The width of the first retained line with a nonzero leading-space
//!     count becomes the unit for the whole document; if no such line exists
//!     the unit defaults to 2. This is a heuristic: documents mixing
//!     inconsistent step sizes are accepted and merely mis-leveled, never
//!     rejected.

/// Tabs are expanded to this many spaces before measuring indentation.
pub const TAB_WIDTH: usize = 4;

/// Fallback unit for documents with no indented line at all.
pub const DEFAULT_INDENT_UNIT: usize = 2;

/// One physical source line after preprocessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based physical line number, for error reporting
    pub number: usize,
    /// Content with surrounding whitespace removed
    pub content: String,
    /// Leading-space width after tab expansion
    pub indent: usize,
}

/// Preprocessed source: the retained lines, in input order, plus the
/// detected indent unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLines {
    pub lines: Vec<Line>,
    pub indent_unit: usize,
}

/// Normalize raw text into typed lines and detect the document indent unit.
pub fn preprocess(source: &str) -> SourceLines {
    let mut lines = Vec::new();
    let mut indent_unit = None;

    for (idx, raw) in source.lines().enumerate() {
        let expanded = raw.replace('\t', &" ".repeat(TAB_WIDTH));
        let content = expanded.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let indent = leading_space_width(&expanded);
        if indent > 0 && indent_unit.is_none() {
            indent_unit = Some(indent);
        }

        lines.push(Line {
            number: idx + 1,
            content: content.to_string(),
            indent,
        });
    }

    SourceLines {
        lines,
        indent_unit: indent_unit.unwrap_or(DEFAULT_INDENT_UNIT),
    }
}

fn leading_space_width(expanded: &str) -> usize {
    expanded.chars().take_while(|c| *c == ' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines_are_dropped() {
        let source = "root: A\n\n# a comment\n   \n  feature: B\n";
        let src = preprocess(source);

        assert_eq!(src.lines.len(), 2);
        assert_eq!(src.lines[0].content, "root: A");
        assert_eq!(src.lines[1].content, "feature: B");
    }

    #[test]
    fn test_line_numbers_are_physical() {
        let source = "# header\nroot: A\n\n  feature: B\n";
        let src = preprocess(source);

        assert_eq!(src.lines[0].number, 2);
        assert_eq!(src.lines[1].number, 4);
    }

    #[test]
    fn test_tabs_expand_before_measuring() {
        let source = "root: A\n\tfeature: B\n";
        let src = preprocess(source);

        assert_eq!(src.lines[1].indent, TAB_WIDTH);
        assert_eq!(src.indent_unit, TAB_WIDTH);
    }

    #[test]
    fn test_first_indented_line_sets_the_unit() {
        let source = "root: A\n    feature: B\n  feature: C\n";
        let src = preprocess(source);

        // Detection is first-wins; the later 2-space line does not revise it.
        assert_eq!(src.indent_unit, 4);
    }

    #[test]
    fn test_indent_unit_defaults_without_indentation() {
        let src = preprocess("root: A\nroot: B\n");
        assert_eq!(src.indent_unit, DEFAULT_INDENT_UNIT);
    }

    #[test]
    fn test_indented_comment_does_not_set_the_unit() {
        let source = "root: A\n    # note\n  feature: B\n";
        let src = preprocess(source);

        assert_eq!(src.indent_unit, 2);
    }

    #[test]
    fn test_output_order_equals_input_order() {
        let source = "root: A\n  feature: B\n  feature: C\n";
        let src = preprocess(source);

        let contents: Vec<&str> = src.lines.iter().map(|l| l.content.as_str()).collect();
        assert_eq!(contents, vec!["root: A", "feature: B", "feature: C"]);
    }
}
