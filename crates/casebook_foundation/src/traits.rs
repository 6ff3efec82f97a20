//! Capability flags carried by nouns.
//!
//! Traits replace a type hierarchy of things: instead of asking whether a
//! noun *is* a container or a direction, the resolver and the actions ask
//! whether it carries a flag.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single capability flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Trait {
    /// Can be looked at.
    Visible,
    /// Listed when a room is described.
    Evident,
    /// Described with its own sentence when a room is described.
    Compelling,
    /// Can be picked up and carried.
    Portable,
    /// Always in scope, wherever the actor is (compass directions).
    Ubiquitous,
    /// A mass or multi-part noun ("crumbs", "mud").
    Composite,
    /// Takes plural agreement ("are").
    Plural,
    /// Things rest on it rather than in it.
    Surface,
    /// Breaks when thrown.
    Fragile,
    /// Attacks on sight.
    Hostile,
    /// Willing to trade.
    Friendly,
    /// A dangerous place to be careless in.
    Precarious,
}

impl Trait {
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Lowercase name of the trait.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Trait::Visible => "visible",
            Trait::Evident => "evident",
            Trait::Compelling => "compelling",
            Trait::Portable => "portable",
            Trait::Ubiquitous => "ubiquitous",
            Trait::Composite => "composite",
            Trait::Plural => "plural",
            Trait::Surface => "surface",
            Trait::Fragile => "fragile",
            Trait::Hostile => "hostile",
            Trait::Friendly => "friendly",
            Trait::Precarious => "precarious",
        }
    }

    const ALL: [Trait; 12] = [
        Trait::Visible,
        Trait::Evident,
        Trait::Compelling,
        Trait::Portable,
        Trait::Ubiquitous,
        Trait::Composite,
        Trait::Plural,
        Trait::Surface,
        Trait::Fragile,
        Trait::Hostile,
        Trait::Friendly,
        Trait::Precarious,
    ];
}

/// A set of traits.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Traits(u16);

impl Traits {
    /// No traits at all.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Builds a set from a list of traits.
    #[must_use]
    pub fn of(traits: &[Trait]) -> Self {
        let mut set = Self::none();
        for t in traits {
            set.insert(*t);
        }
        set
    }

    /// Returns a copy with the trait added.
    #[must_use]
    pub const fn with(self, t: Trait) -> Self {
        Self(self.0 | t.bit())
    }

    /// Returns a copy with the trait removed.
    #[must_use]
    pub const fn without(self, t: Trait) -> Self {
        Self(self.0 & !t.bit())
    }

    /// Adds a trait.
    pub fn insert(&mut self, t: Trait) {
        self.0 |= t.bit();
    }

    /// Returns true if the trait is present.
    #[must_use]
    pub const fn has(self, t: Trait) -> bool {
        self.0 & t.bit() != 0
    }

    /// Shorthand for [`Trait::Ubiquitous`].
    #[must_use]
    pub const fn is_ubiquitous(self) -> bool {
        self.has(Trait::Ubiquitous)
    }

    /// Shorthand for [`Trait::Composite`].
    #[must_use]
    pub const fn is_composite(self) -> bool {
        self.has(Trait::Composite)
    }

    /// Iterates the traits present.
    pub fn iter(self) -> impl Iterator<Item = Trait> {
        Trait::ALL.into_iter().filter(move |t| self.has(*t))
    }
}

impl fmt::Debug for Traits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Trait::name)).finish()
    }
}
