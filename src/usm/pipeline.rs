//! Processing pipeline for the USM format
//!
//! This module wires the individual stages into the one-way flow a caller
//! actually wants: raw text in, finished story map out.
//!
//! # Architecture
//!
//! The pipeline executes five sequential stages:
//!
//! 1. **Preprocessing** - typed lines + indent-unit detection
//! 2. **Parsing** - indentation-stack tree construction
//! 3. **Validation** - tree-shape and required-field rules
//! 4. **Relation resolution** - dangling `related` references dropped
//! 5. **Layout** - deterministic placeholder positions
//!
//! Each run owns all of its state; two concurrent calls share nothing.
//!
//! For most use cases the convenience function [parse_document()] is the
//! recommended entry point:
//!
//! ```rust
//! use usm::usm::pipeline::parse_document;
//!
//! let map = parse_document("root: My Product\n  feature: Checkout\n").expect("parse failed");
//! assert_eq!(map.len(), 2);
//! ```

use crate::usm::error::ParseResult;
use crate::usm::layout::assign_positions;
use crate::usm::lines::preprocess;
use crate::usm::node::StoryMap;
use crate::usm::parser::parse_lines;
use crate::usm::resolve::resolve_relations;
use crate::usm::validate::validate;

/// The core processing pipeline.
///
/// This is a simple struct that encodes the complete stage sequence. For
/// most use cases, prefer the convenience function [parse_document()].
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Execute the complete pipeline on source text.
    pub fn run(&self, source: &str) -> ParseResult<StoryMap> {
        let lines = preprocess(source);
        let mut map = parse_lines(&lines)?;
        validate(&map)?;
        resolve_relations(&mut map);
        assign_positions(&mut map);
        Ok(map)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a USM document into a story map.
pub fn parse_document(source: &str) -> ParseResult<StoryMap> {
    Pipeline::new().run(source)
}
