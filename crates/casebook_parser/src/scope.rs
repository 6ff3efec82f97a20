//! Scope evaluation for noun resolution.
//!
//! Sorts candidate entities by how the actor can reach them, then selects
//! the pool a role's [`Scope`] allows.

use casebook_foundation::{EntityId, Scope};
use casebook_world::WorldView;

/// Candidates partitioned by reachability relative to an actor.
///
/// Each list keeps the order of the candidates it was surveyed from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reach {
    /// In the actor's inventory.
    pub held: Vec<EntityId>,
    /// Lying in the actor's room.
    pub in_location: Vec<EntityId>,
    /// Inside an open container the actor can reach.
    pub in_containers: Vec<EntityId>,
    /// Carried by another creature the actor can reach.
    pub with_creatures: Vec<EntityId>,
}

impl Reach {
    /// Sorts candidates by how the actor can reach them.
    ///
    /// Candidates the actor cannot reach at all are dropped.
    pub fn survey<W>(world: &W, actor: EntityId, candidates: &[EntityId]) -> Self
    where
        W: WorldView + ?Sized,
    {
        let mut reach = Reach::default();
        for &entity in candidates {
            if world.held_by(actor, entity) {
                reach.held.push(entity);
            }
            if world.in_location_of(actor, entity) {
                reach.in_location.push(entity);
            }
            if world.open_container_holding(actor, entity).is_some() {
                reach.in_containers.push(entity);
            }
            if world.creature_carrying(actor, entity).is_some() {
                reach.with_creatures.push(entity);
            }
        }
        reach
    }

    /// Held or in the actor's room.
    #[must_use]
    pub fn proximate(&self) -> Vec<EntityId> {
        concat(&[&self.held, &self.in_location])
    }

    /// Everything reachable.
    #[must_use]
    pub fn nearby(&self) -> Vec<EntityId> {
        concat(&[
            &self.held,
            &self.in_location,
            &self.in_containers,
            &self.with_creatures,
        ])
    }

    /// The pool a scope allows.
    #[must_use]
    pub fn available(&self, scope: Scope) -> Vec<EntityId> {
        match scope {
            Scope::Inventory => self.held.clone(),
            Scope::Proximity => self.proximate(),
            Scope::External => concat(&[
                &self.in_location,
                &self.in_containers,
                &self.with_creatures,
            ]),
            Scope::Nearby => self.nearby(),
        }
    }
}

fn concat(parts: &[&Vec<EntityId>]) -> Vec<EntityId> {
    parts.iter().flat_map(|part| part.iter().copied()).collect()
}
