//! The proximity queries the command resolver relies on

use casebook_foundation::EntityId;
use casebook_world::{Body, World, WorldView};

fn id(n: u32) -> EntityId {
    EntityId::new(n)
}

/// hall(1) holds player(2), crate(3, open) with lamp(4), box(5, closed)
/// with coin(6), guard(7) carrying badge(8), and a rug(9). The player
/// holds a pouch(10, open) with a gem(11). study(12) holds a book(13).
fn setup() -> World {
    let mut world = World::new();
    world.set_body(id(1), Body::Room);
    world.set_body(id(12), Body::Room);
    world.set_body(id(2), Body::Creature { health: 10 });
    world.set_body(id(7), Body::Creature { health: 10 });
    world.set_body(id(3), Body::open_container());
    world.set_body(id(5), Body::closed_container());
    world.set_body(id(10), Body::open_container());
    for (thing, holder) in [
        (2, 1),
        (3, 1),
        (4, 3),
        (5, 1),
        (6, 5),
        (7, 1),
        (8, 7),
        (9, 1),
        (10, 2),
        (11, 10),
        (13, 12),
    ] {
        world.place(id(thing), id(holder)).unwrap();
    }
    world
}

#[test]
fn held_and_in_location() {
    let world = setup();
    assert!(world.held_by(id(2), id(10)));
    assert!(!world.held_by(id(2), id(11)));
    assert!(world.in_location_of(id(2), id(9)));
    assert!(!world.in_location_of(id(2), id(13)));
}

#[test]
fn open_containers_in_reach() {
    let world = setup();
    assert_eq!(world.open_container_holding(id(2), id(4)), Some(id(3)));
    assert_eq!(world.open_container_holding(id(2), id(11)), Some(id(10)));
    assert_eq!(world.open_container_holding(id(2), id(6)), None);
}

#[test]
fn creatures_in_reach() {
    let world = setup();
    assert_eq!(world.creature_carrying(id(2), id(8)), Some(id(7)));
    assert_eq!(world.creature_carrying(id(2), id(10)), None);
}

#[test]
fn other_rooms_are_out_of_reach() {
    let world = setup();
    assert_eq!(world.location_of(id(2)), Some(id(1)));
    assert_eq!(world.location_of(id(13)), Some(id(12)));
    assert!(!world.in_location_of(id(2), id(13)));
    assert_eq!(world.open_container_holding(id(2), id(13)), None);
}

#[test]
fn location_is_the_room_not_the_holder() {
    let world = setup();
    assert_eq!(world.location_of(id(11)), None);
    assert_eq!(world.location_of(id(8)), None);
}

#[test]
fn views_work_through_trait_objects() {
    let world = setup();
    let view: &dyn WorldView = &world;
    assert!(view.held_by(id(2), id(10)));
    assert_eq!(view.location_of(id(2)), Some(id(1)));
}
