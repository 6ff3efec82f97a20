//! Core types shared by every Casebook layer.
//!
//! This crate provides:
//! - [`EntityId`], [`ActionId`], [`ModifierId`] - Stable catalog identities
//! - [`Role`], [`Scope`], [`RoleSet`] - Thematic roles and their scopes
//! - [`Trait`], [`Traits`] - Capability flags carried by nouns
//! - [`Outcome`] - The user-facing result of a command
//! - [`Error`] - Setup-time configuration errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod outcome;
pub mod role;
pub mod traits;

pub use entity::{ActionId, EntityId, ModifierId};
pub use error::{Error, ErrorKind};
pub use outcome::Outcome;
pub use role::{Role, RoleSet, Scope};
pub use traits::{Trait, Traits};

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, Error>;
