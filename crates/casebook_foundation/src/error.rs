//! Configuration error types.
//!
//! These errors are raised while the vocabulary and the actions are being
//! set up. They indicate a programming mistake in the game content, never a
//! bad player command; command failures live in the parser crate.

use thiserror::Error;

use crate::entity::{ActionId, EntityId};
use crate::role::RoleSet;

/// The main error type for setup operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an invalid role configuration error.
    #[must_use]
    pub fn invalid_roles(action: impl Into<String>, required_unassigned: RoleSet) -> Self {
        Self::new(ErrorKind::InvalidRoleConfiguration {
            action: action.into(),
            required_unassigned,
        })
    }

    /// Creates an unknown verb error.
    #[must_use]
    pub fn unknown_verb(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownVerb(name.into()))
    }

    /// Creates an unknown entity error.
    #[must_use]
    pub fn unknown_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::UnknownEntity(id))
    }

    /// Creates an unknown action error.
    #[must_use]
    pub fn unknown_action(id: ActionId) -> Self {
        Self::new(ErrorKind::UnknownAction(id))
    }

    /// Creates a duplicate verb error.
    #[must_use]
    pub fn duplicate_verb(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateVerb(name.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An action requires a role that no object, indirect object or
    /// preposition can ever fill.
    #[error("action '{action}' requires unassigned roles {required_unassigned}")]
    InvalidRoleConfiguration {
        /// Name of the offending action.
        action: String,
        /// Required roles that nothing in the action wires up.
        required_unassigned: RoleSet,
    },

    /// A verb name was referenced before it was registered.
    #[error("unknown verb: {0}")]
    UnknownVerb(String),

    /// A verb name or alias is already taken by another action.
    #[error("verb already registered: {0}")]
    DuplicateVerb(String),

    /// Entity is not in the vocabulary.
    #[error("entity not found: {0:?}")]
    UnknownEntity(EntityId),

    /// Action is not in the vocabulary.
    #[error("action not found: {0:?}")]
    UnknownAction(ActionId),
}
