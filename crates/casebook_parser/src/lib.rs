//! Case-grammar command interpreter for text adventure games.
//!
//! This crate turns player input like "give apple to villager" or
//! "unlock trunk with golden key" into a role schema, checks it against the
//! verb's contract and runs it against the world.
//!
//! # Architecture
//!
//! ```text
//! "unlock trunk with golden key"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["unlock", "trunk", "with", "golden", "key"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SYNTAX          │  → verb: unlock, direct: trunk,
//! │                 │    with: {golden} key
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ROLE            │  → Agent: player, Patient: trunk,
//! │ ASSIGNMENT      │    Instrument: golden key (or AMBIGUOUS)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VALIDATION      │  → wired? required? legal?
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ EXECUTION +     │  → Outcome { success, "The trunk is now unlocked" }
//! │ CONSEQUENCES    │
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Runtime storage for nouns, verbs, modifiers and function words
//! - [`tokenizer`] - Convert raw input to words and word classes
//! - [`syntax`] - Verb, objects and prepositional phrases
//! - [`noun_phrase`] - Noun phrase representation and resolution
//! - [`scope`] - Entity reach for noun resolution
//! - [`command`] - Role assignment
//! - [`schema`] - Role to entity bindings
//! - [`action`] - Action contracts, validation and execution
//! - [`consequence`] - Exact-match outcome overrides
//! - [`parser`] - Main interpreter pipeline orchestration
//! - [`error`] - Command failures and their messages
//! - [`stdlib`] - Standard verbs, noun presets and directions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod command;
pub mod consequence;
pub mod error;
pub mod noun_phrase;
pub mod parser;
pub mod schema;
pub mod scope;
pub mod stdlib;
pub mod syntax;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for convenience
pub use action::{Action, ActionBuilder, Effect, Scene};
pub use command::RoleAssigner;
pub use consequence::{ConsequenceKey, ConsequenceRule, ConsequenceTable};
pub use error::{Candidate, CommandError, SyntaxError};
pub use noun_phrase::{NounPhrase, NounResolver, PrepPhrase};
pub use parser::{Command, Interpreter};
pub use schema::Schema;
pub use stdlib::{Kind, standard_vocabulary};
pub use syntax::{ParsedCommand, SyntaxParser};
pub use vocabulary::{Noun, NounBuilder, Vocabulary};
