//! In-memory world placement store.
//!
//! The `World` records where every entity is: in a room, inside a
//! container, or carried by a creature. It uses persistent collections so
//! a snapshot is an O(1) clone, but it is mutated in place by the command
//! being executed.

use casebook_foundation::EntityId;
use im::{HashMap, HashSet, Vector};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::view::WorldView;

/// Errors raised by world mutations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The destination cannot hold other entities.
    #[error("{0} cannot hold anything")]
    NotAHolder(EntityId),
    /// The container is closed.
    #[error("{0} is closed")]
    Closed(EntityId),
    /// The entity has no body that can be opened or closed.
    #[error("{0} cannot be opened or closed")]
    NotOpenable(EntityId),
    /// The entity is not a creature.
    #[error("{0} is not a creature")]
    NotACreature(EntityId),
    /// The entity is not anywhere.
    #[error("{0} is not placed anywhere")]
    NotPlaced(EntityId),
    /// An entity cannot end up inside itself, directly or through
    /// something it holds.
    #[error("{0} cannot contain itself")]
    SelfContainment(EntityId),
    /// The holder has no room left for the entity.
    #[error("{holder} has no room for {entity}")]
    NoRoom {
        /// The full holder.
        holder: EntityId,
        /// The entity that did not fit.
        entity: EntityId,
    },
}

/// How a creature currently feels about the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mood {
    /// Will trade and chat.
    Friendly,
    /// Refuses everything.
    Hostile,
}

/// The physical shape of an entity that can hold or gate other entities.
///
/// Entities without a body are plain things: they can be placed, but
/// nothing can be placed in them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    /// A location the actor can stand in.
    Room,
    /// Something with an inside that may be closed and locked.
    Container {
        /// Contents are out of reach while closed.
        closed: bool,
        /// Cannot be opened while locked.
        locked: bool,
    },
    /// Something that can be opened and locked but holds nothing.
    Door {
        /// Whether the door is shut.
        closed: bool,
        /// Whether the door is locked.
        locked: bool,
    },
    /// A living thing; its contents are its inventory.
    Creature {
        /// Remaining health.
        health: i32,
    },
}

impl Body {
    /// A closed, unlocked container.
    #[must_use]
    pub const fn closed_container() -> Self {
        Body::Container {
            closed: true,
            locked: false,
        }
    }

    /// An open container.
    #[must_use]
    pub const fn open_container() -> Self {
        Body::Container {
            closed: false,
            locked: false,
        }
    }

    const fn can_hold(self) -> bool {
        matches!(
            self,
            Body::Room | Body::Container { .. } | Body::Creature { .. }
        )
    }
}

/// Placement state of every entity in the game.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    /// Bodies by entity.
    bodies: HashMap<EntityId, Body>,
    /// Holder of each placed entity.
    parents: HashMap<EntityId, EntityId>,
    /// Ordered contents of each holder.
    contents: HashMap<EntityId, Vector<EntityId>>,
    /// Exits: (room, direction) -> destination room.
    exits: HashMap<(EntityId, EntityId), EntityId>,
    /// Doors gating exits: (room, direction) -> door.
    doors: HashMap<(EntityId, EntityId), EntityId>,
    /// Bulk of each entity; missing means weightless.
    sizes: HashMap<EntityId, u32>,
    /// Total bulk each holder accepts; missing means unlimited.
    capacities: HashMap<EntityId, u32>,
    /// Damage each weapon deals.
    damage: HashMap<EntityId, i32>,
    /// Moods that replace a creature's starting disposition.
    moods: HashMap<EntityId, Mood>,
    /// Which lock each key fits.
    keys: HashMap<EntityId, EntityId>,
    /// Items each creature would accept as a gift.
    wants: HashMap<EntityId, HashSet<EntityId>>,
    /// Accumulated score.
    score: i64,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Bodies ---

    /// Gives an entity a body.
    pub fn set_body(&mut self, entity: EntityId, body: Body) {
        self.bodies.insert(entity, body);
    }

    /// Returns the body of an entity, if it has one.
    #[must_use]
    pub fn body(&self, entity: EntityId) -> Option<Body> {
        self.bodies.get(&entity).copied()
    }

    /// Returns true if the entity is a room.
    #[must_use]
    pub fn is_room(&self, entity: EntityId) -> bool {
        matches!(self.body(entity), Some(Body::Room))
    }

    /// Returns true if the entity is a creature.
    #[must_use]
    pub fn is_creature(&self, entity: EntityId) -> bool {
        matches!(self.body(entity), Some(Body::Creature { .. }))
    }

    /// Returns true if the entity is a container.
    #[must_use]
    pub fn is_container(&self, entity: EntityId) -> bool {
        matches!(self.body(entity), Some(Body::Container { .. }))
    }

    /// Returns whether an openable entity is closed, or `None` if it
    /// cannot be opened at all.
    #[must_use]
    pub fn is_closed(&self, entity: EntityId) -> Option<bool> {
        match self.body(entity)? {
            Body::Container { closed, .. } | Body::Door { closed, .. } => Some(closed),
            _ => None,
        }
    }

    /// Returns whether an openable entity is locked, or `None` if it
    /// cannot be locked at all.
    #[must_use]
    pub fn is_locked(&self, entity: EntityId) -> Option<bool> {
        match self.body(entity)? {
            Body::Container { locked, .. } | Body::Door { locked, .. } => Some(locked),
            _ => None,
        }
    }

    /// Opens or closes a container or door.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be opened.
    pub fn set_closed(&mut self, entity: EntityId, value: bool) -> Result<(), WorldError> {
        match self.bodies.get_mut(&entity) {
            Some(Body::Container { closed, .. } | Body::Door { closed, .. }) => {
                *closed = value;
                Ok(())
            }
            _ => Err(WorldError::NotOpenable(entity)),
        }
    }

    /// Locks or unlocks a container or door.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be locked.
    pub fn set_locked(&mut self, entity: EntityId, value: bool) -> Result<(), WorldError> {
        match self.bodies.get_mut(&entity) {
            Some(Body::Container { locked, .. } | Body::Door { locked, .. }) => {
                *locked = value;
                Ok(())
            }
            _ => Err(WorldError::NotOpenable(entity)),
        }
    }

    /// Returns the health of a creature.
    #[must_use]
    pub fn health(&self, creature: EntityId) -> Option<i32> {
        match self.body(creature)? {
            Body::Creature { health } => Some(health),
            _ => None,
        }
    }

    /// Sets the health of a creature.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not a creature.
    pub fn set_health(&mut self, creature: EntityId, value: i32) -> Result<(), WorldError> {
        match self.bodies.get_mut(&creature) {
            Some(Body::Creature { health }) => {
                *health = value;
                Ok(())
            }
            _ => Err(WorldError::NotACreature(creature)),
        }
    }

    /// Adjusts the health of a creature by a delta.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not a creature.
    pub fn adjust_health(&mut self, creature: EntityId, delta: i32) -> Result<i32, WorldError> {
        let current = self
            .health(creature)
            .ok_or(WorldError::NotACreature(creature))?;
        let updated = current.saturating_add(delta);
        self.set_health(creature, updated)?;
        Ok(updated)
    }

    // --- Placement ---

    /// Returns the direct holder of an entity.
    #[must_use]
    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.parents.get(&entity).copied()
    }

    /// Iterates the direct contents of a holder in placement order.
    pub fn contents(&self, holder: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.contents
            .get(&holder)
            .into_iter()
            .flat_map(|items| items.iter().copied())
    }

    /// Returns true if the holder directly contains the entity.
    #[must_use]
    pub fn contains(&self, holder: EntityId, entity: EntityId) -> bool {
        self.parent(entity) == Some(holder)
    }

    /// Returns true if `ancestor` holds `entity`, directly or through any
    /// chain of holders. An entity counts as its own ancestor.
    #[must_use]
    pub fn encloses(&self, ancestor: EntityId, entity: EntityId) -> bool {
        let mut cursor = Some(entity);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Places an entity inside a holder, ignoring closed lids and capacity.
    ///
    /// Used while building content. Any previous placement is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot hold anything, or if the
    /// destination is the entity itself or something inside it.
    pub fn place(&mut self, entity: EntityId, holder: EntityId) -> Result<(), WorldError> {
        if self.encloses(entity, holder) {
            return Err(WorldError::SelfContainment(entity));
        }
        if !self.body(holder).is_some_and(Body::can_hold) {
            return Err(WorldError::NotAHolder(holder));
        }
        self.detach(entity);
        self.parents.insert(entity, holder);
        self.contents.entry(holder).or_default().push_back(entity);
        Ok(())
    }

    /// Moves an entity to a new holder, respecting closed containers on
    /// both ends and the destination's capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not placed, if either end is a
    /// closed container, if the destination is full, or if it cannot hold
    /// anything.
    pub fn move_to(&mut self, entity: EntityId, holder: EntityId) -> Result<(), WorldError> {
        let source = self.parent(entity).ok_or(WorldError::NotPlaced(entity))?;
        for end in [source, holder] {
            if self.is_container(end) && self.is_closed(end) == Some(true) {
                return Err(WorldError::Closed(end));
            }
        }
        if source != holder && !self.has_room_for(holder, entity) {
            return Err(WorldError::NoRoom { holder, entity });
        }
        self.place(entity, holder)
    }

    /// Takes an entity out of the world entirely.
    ///
    /// Returns the holder it was removed from.
    pub fn remove(&mut self, entity: EntityId) -> Option<EntityId> {
        self.detach(entity)
    }

    fn detach(&mut self, entity: EntityId) -> Option<EntityId> {
        let holder = self.parents.remove(&entity)?;
        if let Some(items) = self.contents.get_mut(&holder) {
            items.retain(|e| *e != entity);
        }
        Some(holder)
    }

    /// Entities the actor can see without opening anything: its own
    /// inventory followed by the contents of its room.
    #[must_use]
    pub fn surroundings(&self, actor: EntityId) -> Vec<EntityId> {
        let mut nearby: Vec<EntityId> = self.contents(actor).collect();
        if let Some(room) = self.location_of(actor) {
            nearby.extend(self.contents(room));
        }
        nearby
    }

    // --- Bulk ---

    /// Sets how much room an entity takes up.
    pub fn set_size(&mut self, entity: EntityId, size: u32) {
        self.sizes.insert(entity, size);
    }

    /// How much room an entity takes up.
    #[must_use]
    pub fn size(&self, entity: EntityId) -> u32 {
        self.sizes.get(&entity).copied().unwrap_or(0)
    }

    /// Limits the total size a holder accepts.
    pub fn set_capacity(&mut self, holder: EntityId, capacity: u32) {
        self.capacities.insert(holder, capacity);
    }

    /// The size limit of a holder, if it has one.
    #[must_use]
    pub fn capacity(&self, holder: EntityId) -> Option<u32> {
        self.capacities.get(&holder).copied()
    }

    /// Total size of everything a holder directly contains.
    #[must_use]
    pub fn load(&self, holder: EntityId) -> u32 {
        self.contents(holder)
            .fold(0, |total: u32, e| total.saturating_add(self.size(e)))
    }

    /// Returns true if the entity fits in what the holder has left.
    #[must_use]
    pub fn has_room_for(&self, holder: EntityId, entity: EntityId) -> bool {
        self.capacity(holder)
            .is_none_or(|capacity| self.load(holder).saturating_add(self.size(entity)) <= capacity)
    }

    // --- Exits ---

    /// Connects a room to another in a direction.
    pub fn add_exit(&mut self, room: EntityId, direction: EntityId, destination: EntityId) {
        self.exits.insert((room, direction), destination);
    }

    /// Where leaving a room in a direction leads.
    #[must_use]
    pub fn exit(&self, room: EntityId, direction: EntityId) -> Option<EntityId> {
        self.exits.get(&(room, direction)).copied()
    }

    /// Puts a door across an exit. The door only blocks the exit while it
    /// is closed.
    pub fn add_door(&mut self, room: EntityId, direction: EntityId, door: EntityId) {
        self.doors.insert((room, direction), door);
    }

    /// The door across an exit, if there is one.
    #[must_use]
    pub fn door(&self, room: EntityId, direction: EntityId) -> Option<EntityId> {
        self.doors.get(&(room, direction)).copied()
    }

    // --- Keys and wants ---

    /// Declares that a key fits a lock.
    pub fn set_key(&mut self, key: EntityId, lock: EntityId) {
        self.keys.insert(key, lock);
    }

    /// Returns true if the key fits the lock.
    #[must_use]
    pub fn key_fits(&self, key: EntityId, lock: EntityId) -> bool {
        self.keys.get(&key) == Some(&lock)
    }

    /// Declares that a creature would accept an item.
    pub fn add_want(&mut self, creature: EntityId, item: EntityId) {
        self.wants.entry(creature).or_default().insert(item);
    }

    /// Returns true if the creature wants the item.
    #[must_use]
    pub fn wants(&self, creature: EntityId, item: EntityId) -> bool {
        self.wants
            .get(&creature)
            .is_some_and(|items| items.contains(&item))
    }

    /// Returns true once the creature carries everything it wants.
    #[must_use]
    pub fn satisfied(&self, creature: EntityId) -> bool {
        self.wants
            .get(&creature)
            .is_none_or(|items| items.iter().all(|item| self.contains(creature, *item)))
    }

    // --- Creatures ---

    /// Sets how much damage a weapon deals.
    pub fn set_damage(&mut self, weapon: EntityId, damage: i32) {
        self.damage.insert(weapon, damage);
    }

    /// Damage a weapon deals; anything unassigned deals one point.
    #[must_use]
    pub fn damage(&self, weapon: EntityId) -> i32 {
        self.damage.get(&weapon).copied().unwrap_or(1)
    }

    /// Changes how a creature feels about the player.
    pub fn set_mood(&mut self, creature: EntityId, mood: Mood) {
        self.moods.insert(creature, mood);
    }

    /// The creature's mood, if anything has changed it.
    #[must_use]
    pub fn mood(&self, creature: EntityId) -> Option<Mood> {
        self.moods.get(&creature).copied()
    }

    // --- Score ---

    /// The accumulated score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Adds points to the score.
    pub fn add_score(&mut self, points: i64) {
        self.score += points;
    }
}

impl WorldView for World {
    fn held_by(&self, actor: EntityId, entity: EntityId) -> bool {
        self.contains(actor, entity)
    }

    fn in_location_of(&self, actor: EntityId, entity: EntityId) -> bool {
        self.location_of(actor)
            .is_some_and(|room| self.contains(room, entity))
    }

    fn open_container_holding(&self, actor: EntityId, entity: EntityId) -> Option<EntityId> {
        let holder = self.parent(entity)?;
        let reachable = self.is_container(holder)
            && self.is_closed(holder) == Some(false)
            && self.surroundings(actor).contains(&holder);
        reachable.then_some(holder)
    }

    fn creature_carrying(&self, actor: EntityId, entity: EntityId) -> Option<EntityId> {
        let holder = self.parent(entity)?;
        let reachable = holder != actor
            && self.is_creature(holder)
            && self.surroundings(actor).contains(&holder);
        reachable.then_some(holder)
    }

    fn location_of(&self, actor: EntityId) -> Option<EntityId> {
        self.parent(actor).filter(|holder| self.is_room(*holder))
    }
}
