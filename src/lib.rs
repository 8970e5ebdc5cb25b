//! # usm
//!
//! A parser and exporter for the USM story map text format.
//!
//! USM documents encode a hierarchical story map: a root node, nested feature
//! categories and leaf user stories, where nesting is carried entirely by
//! indentation. The library is a pure transform in both directions: source
//! text goes through preprocessing, parsing, validation, relation resolution
//! and placeholder layout to become a [StoryMap](usm::node::StoryMap); a
//! persisted node collection goes back out through the
//! [exporter](usm::export) as text the parser accepts again.
//!
//! The pipeline stages are deliberately kept as separate modules so each can
//! be tested in isolation. All state for one parse lives in a context value
//! owned by that call; there are no process-wide caches, which makes the
//! conversion functions safe to call from anywhere.
//!
//! For parsing, the recommended entry point is
//! [parse_document](usm::pipeline::parse_document).

#![allow(rustdoc::invalid_html_tags)]

pub mod usm;
