//! End-to-end tests across every layer.
//!
//! Tests for whole commands:
//! - Input text through parsing, resolution, validation and execution
//! - Consequences firing against a live world
//! - Sessions keeping turns and history around the interpreter

mod scenarios;
