//! Exporter from persisted records back to USM text
//!
//!     The exporter is the inverse of the parse pipeline: it takes the flat
//!     record rows the storage layer holds and reconstitutes a document the
//!     parser accepts again. Declaration lines always carry the explicit
//!     [@id] prefix so identifiers survive a download/edit/re-import cycle.
//!
//!     Only non-empty fields are written. Scalar values containing newlines
//!     use the `key: |` multi-line syntax with their content lines one step
//!     deeper; list fields are comma-joined onto a single line. Each child
//!     subtree is preceded by one blank line for readability.
//!
//!     The indent step is a formatting rule of the exporter, deliberately
//!     independent of whatever unit the originally imported document used.

use std::collections::HashMap;

use crate::usm::records::NodeRecord;

/// Formatting configuration for the exporter.
#[derive(Debug, Clone)]
pub struct ExportRules {
    /// Spaces per nesting level in the emitted document
    pub indent_unit: usize,
}

impl Default for ExportRules {
    fn default() -> Self {
        Self { indent_unit: 2 }
    }
}

/// Serializes a record collection into USM text.
///
/// Records must form a closed tree: every id in a `children_ids` list has to
/// be present in the input. A missing record is a caller bug and panics
/// rather than producing a silently truncated document.
pub struct Exporter<'a> {
    rules: ExportRules,
    records: &'a [NodeRecord],
    by_id: HashMap<&'a str, &'a NodeRecord>,
    output: String,
}

impl<'a> Exporter<'a> {
    pub fn new(records: &'a [NodeRecord], rules: ExportRules) -> Self {
        let by_id = records
            .iter()
            .map(|record| (record.node_id.as_str(), record))
            .collect();
        Self {
            rules,
            records,
            by_id,
            output: String::new(),
        }
    }

    /// Emit every root subtree, in input order.
    pub fn export(mut self) -> String {
        let records = self.records;
        for record in records {
            if record.parent_id.is_none() {
                if !self.output.is_empty() {
                    self.output.push('\n');
                }
                self.emit_node(record, 0);
            }
        }
        self.output
    }

    fn emit_node(&mut self, record: &'a NodeRecord, depth: usize) {
        let declaration = format!(
            "[@{}] {}: {}",
            record.node_id,
            record.node_type.keyword(),
            record.title
        );
        self.write_line(depth, &declaration);

        let props = depth + 1;
        self.emit_scalar(props, "desc", &record.description);
        self.emit_scalar(props, "comment", &record.comment);
        self.emit_list(props, "jira", &record.jira_tickets, "");
        self.emit_scalar(props, "product", &record.product);
        self.emit_scalar(props, "team", &record.team);
        self.emit_list(props, "team_tags", &record.team_tags, "");
        self.emit_list(props, "related", &record.related_ids, "@");
        self.emit_scalar(props, "as_a", &record.as_a);
        self.emit_scalar(props, "i_want", &record.i_want);
        self.emit_scalar(props, "so_that", &record.so_that);

        for child_id in &record.children_ids {
            let child = match self.by_id.get(child_id.as_str()) {
                Some(record) => *record,
                None => panic!(
                    "child `{}` of `{}` has no record in the export input",
                    child_id, record.node_id
                ),
            };
            self.output.push('\n');
            self.emit_node(child, depth + 1);
        }
    }

    fn emit_scalar(&mut self, depth: usize, key: &str, value: &Option<String>) {
        let Some(value) = value else { return };
        if value.is_empty() {
            return;
        }
        if value.contains('\n') {
            self.write_line(depth, &format!("{}: |", key));
            for line in value.split('\n') {
                if line.is_empty() {
                    self.output.push('\n');
                } else {
                    self.write_line(depth + 1, line);
                }
            }
        } else {
            self.write_line(depth, &format!("{}: {}", key, value));
        }
    }

    fn emit_list(&mut self, depth: usize, key: &str, values: &[String], prefix: &str) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(|value| format!("{}{}", prefix, value))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_line(depth, &format!("{}: {}", key, joined));
    }

    fn write_line(&mut self, depth: usize, text: &str) {
        self.output
            .push_str(&" ".repeat(self.rules.indent_unit * depth));
        self.output.push_str(text);
        self.output.push('\n');
    }
}

/// Export records with the default formatting rules.
pub fn export(records: &[NodeRecord]) -> String {
    Exporter::new(records, ExportRules::default()).export()
}
