//! Error types for USM parsing

use std::fmt;

/// The error produced by parsing and validation.
///
/// Both line-level syntax failures (duplicate explicit identifiers, stray
/// lines) and whole-node semantic failures (missing titles, stories with
/// children) are reported through this one type. The line number is 1-based
/// and refers to the physical line in the submitted source, before comment
/// and blank-line stripping. Every error is terminal for that parse call;
/// the caller must resubmit corrected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Type alias for results of parse-side operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Format source code context around an error line
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, error_line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_idx = error_line.saturating_sub(1);

    let start_idx = error_idx.saturating_sub(2);
    let end_idx = (error_idx + 3).min(lines.len());

    let mut context = String::new();

    for idx in start_idx..end_idx {
        let marker = if idx == error_idx { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, idx + 1, lines[idx]));
    }

    context
}
