//! The proximity interface the resolver consumes.
//!
//! Everything is relative to an acting entity: "held" means held by that
//! actor, "in location" means in the actor's current room.

use casebook_foundation::EntityId;

/// Read-only proximity queries over a live world.
pub trait WorldView {
    /// Returns true if the entity is in the actor's inventory.
    fn held_by(&self, actor: EntityId, entity: EntityId) -> bool;

    /// Returns true if the entity lies directly in the actor's room.
    fn in_location_of(&self, actor: EntityId, entity: EntityId) -> bool;

    /// Finds an open container, held by the actor or lying in the actor's
    /// room, that directly holds the entity.
    fn open_container_holding(&self, actor: EntityId, entity: EntityId) -> Option<EntityId>;

    /// Finds a creature other than the actor, held by the actor or standing
    /// in the actor's room, that carries the entity.
    fn creature_carrying(&self, actor: EntityId, entity: EntityId) -> Option<EntityId>;

    /// The room the actor is currently in.
    fn location_of(&self, actor: EntityId) -> Option<EntityId>;
}
