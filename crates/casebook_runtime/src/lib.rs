//! Session, REPL and CLI for Casebook.
//!
//! This crate provides:
//! - [`Session`] - One game in progress: interpreter, world, turns and history
//! - [`Repl`] - Interactive read-eval-print loop over a line editor
//! - [`run_batch`] - Scripted play from any reader
//! - [`demo`] - A small adventure to play
//!
//! The `casebook` binary wires these together behind a command line.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod demo;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod repl;
pub mod session;

pub use config::SessionConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use error::{Result, RuntimeError};
pub use repl::{Repl, run_batch};
pub use session::{Response, Session};
