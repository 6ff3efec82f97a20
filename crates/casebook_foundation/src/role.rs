//! Thematic roles and resolution scopes.
//!
//! A command fills up to five thematic slots. Each slot has a scope that
//! decides which world entities are eligible to fill it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A thematic slot an action fills from the command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Whoever performs the action.
    Agent,
    /// The entity acted upon.
    Patient,
    /// The entity moved or handed over.
    Theme,
    /// Where the action is directed.
    Goal,
    /// What the action is performed with.
    Instrument,
}

impl Role {
    /// All roles in their fixed iteration order.
    pub const ALL: [Role; 5] = [
        Role::Agent,
        Role::Patient,
        Role::Theme,
        Role::Goal,
        Role::Instrument,
    ];

    /// Position of this role in [`Role::ALL`].
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Role::Agent => 0,
            Role::Patient => 1,
            Role::Theme => 2,
            Role::Goal => 3,
            Role::Instrument => 4,
        }
    }

    /// Lowercase name of the role.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Agent => "agent",
            Role::Patient => "patient",
            Role::Theme => "theme",
            Role::Goal => "goal",
            Role::Instrument => "instrument",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which part of the world may resolve a role.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scope {
    /// Only what the actor is holding.
    Inventory,
    /// What the actor holds or what lies in the actor's room.
    Proximity,
    /// Anything nearby that the actor is not already holding.
    External,
    /// Everything reachable: held, in the room, in open containers,
    /// or carried by other creatures.
    #[default]
    Nearby,
}

/// A small copyable set of roles.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every role.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b1_1111)
    }

    /// Builds a set from a list of roles.
    #[must_use]
    pub fn of(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }

    /// Adds a role.
    pub fn insert(&mut self, role: Role) {
        self.0 |= 1 << role.slot();
    }

    /// Removes a role.
    pub fn remove(&mut self, role: Role) {
        self.0 &= !(1 << role.slot());
    }

    /// Returns true if the role is in the set.
    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & (1 << role.slot()) != 0
    }

    /// Returns true if no role is in the set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Roles present in both sets.
    #[must_use]
    pub const fn intersection(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 & other.0)
    }

    /// Iterates the roles in [`Role::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Extend<Role> for RoleSet {
    fn extend<I: IntoIterator<Item = Role>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Role::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
