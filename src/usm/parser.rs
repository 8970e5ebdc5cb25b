//! Line-by-line parser for the USM format
//!
//!     The parser consumes preprocessed lines in order and builds the node
//!     arena directly; there is no intermediate representation between the
//!     typed lines and the finished map. Three line shapes exist:
//!
//!         - Node declarations: `[@id] keyword: title` with the id part
//!           optional and the keyword one of root/feature/story. These are
//!           the only lines whose indentation is semantic.
//!         - Property lines: any other line containing a colon. The key
//!           selects a field on the most recently declared node; unknown
//!           keys are ignored so newer documents keep loading on older code.
//!         - Continuation lines: colon-less lines, meaningful only while a
//!           multi-line field (opened by `key: |`) is collecting.
//!
//! Ancestor stack
//!
//!     Nesting is resolved with a stack of (level, node) pairs for the open
//!     ancestor chain. A declaration at level N first pops every entry at
//!     level >= N, closing sibling and cousin scopes; whatever remains on
//!     top is the parent. Property indentation is deliberately not consulted
//!     here, only declarations move the stack.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::usm::error::{ParseError, ParseResult};
use crate::usm::ident::IdAllocator;
use crate::usm::lines::{Line, SourceLines};
use crate::usm::node::{Node, NodeType, StoryMap};

/// Matches `[@id] keyword: title` with the explicit id part optional.
static NODE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[@([^\]\s]+)\]\s+)?(root|feature|story):\s*(.*)$").unwrap()
});

/// Parse preprocessed lines into a story map.
///
/// Fails on duplicate explicit identifiers and on lines that fit none of the
/// three line shapes; everything else is accepted. Semantic checks (titles,
/// leaf-only stories) belong to the validator, not this pass.
pub fn parse_lines(source: &SourceLines) -> ParseResult<StoryMap> {
    let mut ctx = ParseContext::new(source.indent_unit);
    for line in &source.lines {
        ctx.consume(line)?;
    }
    Ok(ctx.finish())
}

/// A multi-line field while its continuation lines are collecting.
struct OpenField {
    key: String,
    buffer: Vec<String>,
}

/// All parser state for one invocation. Nothing here outlives the call.
struct ParseContext {
    indent_unit: usize,
    map: StoryMap,
    alloc: IdAllocator,
    /// Open ancestor chain as (level, arena index) pairs
    stack: Vec<(usize, usize)>,
    /// Arena index of the most recently declared node
    active: Option<usize>,
    open_field: Option<OpenField>,
}

impl ParseContext {
    fn new(indent_unit: usize) -> Self {
        Self {
            // The preprocessor never reports 0, but a unit of at least 1
            // also keeps the level division total for hand-built inputs.
            indent_unit: indent_unit.max(1),
            map: StoryMap::new(),
            alloc: IdAllocator::new(),
            stack: Vec::new(),
            active: None,
            open_field: None,
        }
    }

    fn consume(&mut self, line: &Line) -> ParseResult<()> {
        if let Some(caps) = NODE_DECLARATION.captures(&line.content) {
            self.commit_open_field();
            let explicit = caps.get(1).map(|m| m.as_str().to_string());
            let keyword = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let node_type = NodeType::from_keyword(keyword)
                .expect("declaration pattern only matches known keywords");
            let title = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
            self.declare_node(line, explicit, node_type, title.to_string())
        } else if let Some((key, value)) = line.content.split_once(':') {
            self.commit_open_field();
            self.assign_property(line, key.trim(), value.trim())
        } else if let Some(field) = self.open_field.as_mut() {
            field.buffer.push(line.content.clone());
            Ok(())
        } else {
            Err(ParseError::new(
                line.number,
                format!(
                    "`{}` is neither a node declaration nor a `key: value` property",
                    line.content
                ),
            ))
        }
    }

    fn declare_node(
        &mut self,
        line: &Line,
        explicit: Option<String>,
        node_type: NodeType,
        title: String,
    ) -> ParseResult<()> {
        let level = line.indent / self.indent_unit;

        let node_id = match explicit {
            Some(id) => {
                if self.map.contains(&id) {
                    return Err(ParseError::new(
                        line.number,
                        format!("duplicate node identifier `{}`", id),
                    ));
                }
                id
            }
            None => self
                .alloc
                .allocate(node_type, |candidate| self.map.contains(candidate)),
        };

        // Close every scope at this level or deeper; the survivor on top of
        // the stack is the parent.
        while self.stack.last().is_some_and(|(l, _)| *l >= level) {
            self.stack.pop();
        }

        let mut node = Node::new(node_id.clone(), node_type, title, level, line.number);
        if let Some(&(_, parent_idx)) = self.stack.last() {
            node.parent_id = Some(self.map.node_at(parent_idx).node_id.clone());
        }
        let idx = self.map.push(node);
        if let Some(&(_, parent_idx)) = self.stack.last() {
            self.map.node_mut(parent_idx).children_ids.push(node_id);
        }

        self.stack.push((level, idx));
        self.active = Some(idx);
        Ok(())
    }

    fn assign_property(&mut self, line: &Line, key: &str, value: &str) -> ParseResult<()> {
        let Some(active) = self.active else {
            return Err(ParseError::new(
                line.number,
                format!("property `{}` appears before any node declaration", key),
            ));
        };

        if value == "|" {
            // Unknown keys open a buffer too, so their continuation lines
            // stay inert instead of erroring as stray text.
            self.open_field = Some(OpenField {
                key: key.to_string(),
                buffer: Vec::new(),
            });
            return Ok(());
        }

        set_field(self.map.node_mut(active), key, value);
        Ok(())
    }

    /// Commit a collecting multi-line field to its node, if one is open.
    fn commit_open_field(&mut self) {
        if let Some(field) = self.open_field.take() {
            if let Some(active) = self.active {
                let joined = field.buffer.join("\n");
                set_field(self.map.node_mut(active), &field.key, &joined);
            }
        }
    }

    fn finish(mut self) -> StoryMap {
        self.commit_open_field();
        self.map
    }
}

fn set_field(node: &mut Node, key: &str, value: &str) {
    match key {
        "desc" => node.description = non_empty(value),
        "comment" => node.comment = non_empty(value),
        "product" => node.product = non_empty(value),
        "team" => node.team = non_empty(value),
        "as_a" => node.as_a = non_empty(value),
        "i_want" => node.i_want = non_empty(value),
        "so_that" => node.so_that = non_empty(value),
        "jira" => node.jira_tickets = split_list(value),
        "team_tags" => node.team_tags = split_list(value),
        "related" => {
            node.related_ids = split_list(value)
                .into_iter()
                .map(|token| token.strip_prefix('@').unwrap_or(&token).to_string())
                .collect();
        }
        // Unknown keys are ignored for forward compatibility.
        _ => {}
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
