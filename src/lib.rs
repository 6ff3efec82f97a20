//! Casebook - Case-grammar command interpreter for interactive fiction
//!
//! This crate re-exports all layers of the Casebook system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: casebook_runtime     Session, REPL, CLI, demo game
//! Layer 2: casebook_parser      Vocabulary, parser, role resolver, actions, consequences
//! Layer 1: casebook_world       Proximity queries, in-memory placement store
//! Layer 0: casebook_foundation  Core types (EntityId, Role, Scope, Outcome, Error)
//! ```

pub use casebook_foundation as foundation;
pub use casebook_parser as parser;
pub use casebook_runtime as runtime;
pub use casebook_world as world;
