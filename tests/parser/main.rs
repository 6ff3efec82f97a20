//! Integration tests for the casebook_parser crate.
//!
//! Tests for the command pipeline:
//! - Syntax parsing against a vocabulary
//! - Noun resolution by scope
//! - Action validation
//! - Consequence lookup and application

mod syntax_tests;
mod validation_tests;
