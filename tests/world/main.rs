//! Integration tests for Layer 1: World
//!
//! Tests for the placement store and the proximity queries it answers.

mod placement;
mod proximity;
