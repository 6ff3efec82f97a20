//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: identifiers, roles, traits, outcomes and errors.

mod errors;
mod roles;
mod values;
