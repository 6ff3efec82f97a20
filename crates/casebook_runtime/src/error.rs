//! Runtime errors.

use casebook_world::WorldError;
use thiserror::Error;

/// Failures that end a session or prevent one from starting.
///
/// Rejected commands are not errors here; they are reported to the player
/// and the session continues.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Vocabulary or action setup failed.
    #[error(transparent)]
    Setup(#[from] casebook_foundation::Error),

    /// Building the world failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The line editor could not read input.
    #[error("line editor error: {0}")]
    Editor(String),

    /// Reading or writing a script failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
