//! Placement, bodies and bookkeeping in the world store

use casebook_foundation::EntityId;
use casebook_world::{Body, World, WorldError, WorldView};

fn id(n: u32) -> EntityId {
    EntityId::new(n)
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn contents_keep_placement_order() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    for n in [5, 3, 9] {
        world.place(id(n), id(1)).unwrap();
    }
    assert_eq!(world.contents(id(1)).collect::<Vec<_>>(), vec![id(5), id(3), id(9)]);
}

#[test]
fn place_replaces_previous_holder() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    world.set_body(id(2), Body::Room);
    world.place(id(3), id(1)).unwrap();
    world.place(id(3), id(2)).unwrap();
    assert!(!world.contains(id(1), id(3)));
    assert!(world.contains(id(2), id(3)));
    assert_eq!(world.contents(id(1)).count(), 0);
}

#[test]
fn plain_things_hold_nothing() {
    let mut world = World::new();
    assert_eq!(world.place(id(2), id(1)), Err(WorldError::NotAHolder(id(1))));

    world.set_body(id(1), Body::Door { closed: true, locked: false });
    assert_eq!(world.place(id(2), id(1)), Err(WorldError::NotAHolder(id(1))));
}

#[test]
fn nothing_contains_itself() {
    let mut world = World::new();
    world.set_body(id(1), Body::open_container());
    assert_eq!(world.place(id(1), id(1)), Err(WorldError::SelfContainment(id(1))));
}

#[test]
fn nothing_contains_its_own_holder() {
    let mut world = World::new();
    for n in 1..=3 {
        world.set_body(id(n), Body::open_container());
    }
    world.place(id(2), id(1)).unwrap();
    world.place(id(3), id(2)).unwrap();

    assert_eq!(world.place(id(1), id(2)), Err(WorldError::SelfContainment(id(1))));
    assert_eq!(world.place(id(1), id(3)), Err(WorldError::SelfContainment(id(1))));
    assert_eq!(world.parent(id(1)), None);
    assert_eq!(world.contents(id(3)).count(), 0);

    // moving the inner bag out first makes the swap legal
    world.remove(id(2));
    world.place(id(1), id(2)).unwrap();
    assert!(world.contains(id(2), id(1)));
}

#[test]
fn move_respects_closed_lids() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    world.set_body(id(2), Body::closed_container());
    world.place(id(2), id(1)).unwrap();
    world.place(id(3), id(1)).unwrap();

    assert_eq!(world.move_to(id(3), id(2)), Err(WorldError::Closed(id(2))));
    world.set_closed(id(2), false).unwrap();
    world.move_to(id(3), id(2)).unwrap();
    assert!(world.contains(id(2), id(3)));
}

#[test]
fn move_requires_placement() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    assert_eq!(world.move_to(id(2), id(1)), Err(WorldError::NotPlaced(id(2))));
}

#[test]
fn remove_detaches() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    world.place(id(2), id(1)).unwrap();
    assert_eq!(world.remove(id(2)), Some(id(1)));
    assert_eq!(world.parent(id(2)), None);
    assert_eq!(world.remove(id(2)), None);
}

// =============================================================================
// Bodies
// =============================================================================

#[test]
fn doors_open_and_lock() {
    let mut world = World::new();
    world.set_body(id(1), Body::Door { closed: true, locked: true });
    assert_eq!(world.is_locked(id(1)), Some(true));
    world.set_locked(id(1), false).unwrap();
    world.set_closed(id(1), false).unwrap();
    assert_eq!(world.is_closed(id(1)), Some(false));
    assert!(!world.is_container(id(1)));
}

#[test]
fn only_lidded_bodies_open() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    assert_eq!(world.is_closed(id(1)), None);
    assert_eq!(world.set_closed(id(1), true), Err(WorldError::NotOpenable(id(1))));
    assert_eq!(world.set_locked(id(2), true), Err(WorldError::NotOpenable(id(2))));
}

#[test]
fn creature_health() {
    let mut world = World::new();
    world.set_body(id(1), Body::Creature { health: 10 });
    assert_eq!(world.adjust_health(id(1), -3), Ok(7));
    world.set_health(id(1), 0).unwrap();
    assert_eq!(world.health(id(1)), Some(0));
    assert_eq!(world.adjust_health(id(2), 1), Err(WorldError::NotACreature(id(2))));
}

// =============================================================================
// Exits, Keys and Wants
// =============================================================================

#[test]
fn exits_keys_and_wants() {
    let mut world = World::new();
    let (cellar, north, garden) = (id(1), id(2), id(3));
    world.add_exit(cellar, north, garden);
    assert_eq!(world.exit(cellar, north), Some(garden));
    assert_eq!(world.exit(garden, north), None);

    world.set_key(id(4), id(5));
    assert!(world.key_fits(id(4), id(5)));
    assert!(!world.key_fits(id(4), id(6)));

    world.add_want(id(7), id(8));
    assert!(world.wants(id(7), id(8)));
    assert!(!world.wants(id(8), id(7)));
}

#[test]
fn clones_are_independent_snapshots() {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    world.set_body(id(2), Body::Room);
    world.place(id(3), id(1)).unwrap();

    let snapshot = world.clone();
    world.move_to(id(3), id(2)).unwrap();
    world.add_score(5);

    assert!(snapshot.contains(id(1), id(3)));
    assert_eq!(snapshot.score(), 0);
    assert_eq!(world.score(), 5);
    assert_eq!(snapshot.location_of(id(3)), Some(id(1)));
}
