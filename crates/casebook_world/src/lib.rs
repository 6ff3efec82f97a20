//! World state for Casebook.
//!
//! This crate provides:
//! - [`WorldView`] - The proximity queries the command resolver needs
//! - [`World`] - An in-memory placement store implementing them
//!
//! Building game content and persisting it are left to the caller; the
//! store only knows which entity sits inside which holder.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod view;
pub mod world;

pub use view::WorldView;
pub use world::{Body, Mood, World, WorldError};
