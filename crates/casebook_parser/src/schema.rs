//! Role bindings for one command.

use std::fmt;
use std::ops::Index;

use casebook_foundation::{EntityId, Role, RoleSet};

/// A fixed five-slot binding from [`Role`] to entity.
///
/// Built fresh for every command; filled during role assignment and only
/// read after that.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Schema([Option<EntityId>; 5]);

impl Schema {
    /// An empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self([None; 5])
    }

    /// Returns a copy with `role` bound to `entity`.
    #[must_use]
    pub fn with(mut self, role: Role, entity: EntityId) -> Self {
        self.set(role, entity);
        self
    }

    /// The entity filling a role.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<EntityId> {
        self.0[role.slot()]
    }

    /// Binds a role.
    pub fn set(&mut self, role: Role, entity: EntityId) {
        self.0[role.slot()] = Some(entity);
    }

    /// Unbinds a role.
    pub fn clear(&mut self, role: Role) {
        self.0[role.slot()] = None;
    }

    /// The roles that are bound.
    #[must_use]
    pub fn filled(&self) -> RoleSet {
        Role::ALL.into_iter().filter(|r| self.get(*r).is_some()).collect()
    }

    /// Bound roles and their entities, in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, EntityId)> + '_ {
        Role::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|entity| (role, entity)))
    }

    /// The raw slots, in role order.
    #[must_use]
    pub const fn slots(&self) -> [Option<EntityId>; 5] {
        self.0
    }
}

impl Index<Role> for Schema {
    type Output = Option<EntityId>;

    fn index(&self, role: Role) -> &Self::Output {
        &self.0[role.slot()]
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
