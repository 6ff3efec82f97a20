//! A small demo adventure.
//!
//! Four rooms in an old house: a crumbling storeroom, a paneled hall with a
//! locked trunk, the north tower where a villager waits, and behind a
//! sturdy door a balcony where jumping is a bad idea.

use casebook_foundation::{EntityId, Role, Trait, Traits};
use casebook_parser::stdlib::{
    Kind, register_directions, register_hazards, register_standard_actions,
};
use casebook_parser::{ConsequenceRule, Interpreter, Noun, NounBuilder, Schema, Vocabulary};
use casebook_world::{Body, World};
use tracing::info;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::session::Session;

/// Health the player starts with.
pub const PLAYER_HEALTH: i32 = 10;

/// How much the player can carry.
pub const PLAYER_CAPACITY: u32 = 40;

/// Entities of the demo that scripts and tests refer to.
#[derive(Clone, Copy, Debug)]
pub struct Landmarks {
    /// The player.
    pub player: EntityId,
    /// Starting room.
    pub storeroom: EntityId,
    /// East of the storeroom.
    pub hall: EntityId,
    /// North of the hall.
    pub tower: EntityId,
    /// Above the tower.
    pub balcony: EntityId,
    /// Locked, in the hall.
    pub trunk: EntityId,
    /// Inside the trunk.
    pub sword: EntityId,
    /// Opens the trunk.
    pub golden_key: EntityId,
    /// Carried by the villager.
    pub bronze_key: EntityId,
    /// Wanted by the villager.
    pub apple: EntityId,
    /// Waits in the tower.
    pub villager: EntityId,
    /// Between the tower and the balcony.
    pub door: EntityId,
    /// On the table in the hall.
    pub vase: EntityId,
}

/// Builds the demo game.
///
/// # Errors
///
/// Returns an error if the content is inconsistent.
pub fn build() -> Result<(Interpreter, World, Landmarks)> {
    let mut vocab = Vocabulary::new();
    register_standard_actions(&mut vocab)?;
    let [north, south, east, west, _, _, _, _, up, down] = register_directions(&mut vocab)?;

    let storeroom = vocab.register_noun(room(
        "room",
        Some("crumbly"),
        "A small storage room with crumbling plaster walls",
    ))?;
    let hall = vocab.register_noun(room(
        "hall",
        Some("paneled"),
        "A large, warm room with wood-paneled walls",
    ))?;
    let tower = vocab.register_noun(room(
        "tower",
        Some("north"),
        "A tower with a high ceiling and red-stained windows",
    ))?;
    let balcony = vocab.register_noun(
        room(
            "balcony",
            None,
            "A breezy, open balcony with a beautiful view of the landscape below",
        )
        .with_traits(Traits::of(&[Trait::Precarious])),
    )?;

    let player = vocab.register_noun(
        Noun::builder("player")
            .with_aliases(&["me", "self"])
            .with_kind(Kind::Player),
    )?;
    let apple = vocab.register_noun(
        Noun::builder("apple")
            .with_modifier("red")
            .with_description("A shiny red apple")
            .with_kind(Kind::Edible),
    )?;
    let golden_key = vocab.register_noun(
        Noun::builder("key")
            .with_modifier("golden")
            .with_description("A small golden key")
            .with_kind(Kind::Key),
    )?;
    let bronze_key = vocab.register_noun(
        Noun::builder("key")
            .with_modifier("bronze")
            .with_description("A heavy bronze key")
            .with_kind(Kind::Key),
    )?;
    let trunk = vocab.register_noun(
        Noun::builder("trunk")
            .with_alias("chest")
            .with_description("A battered old trunk")
            .with_kind(Kind::Container),
    )?;
    let sword = vocab.register_noun(
        Noun::builder("sword")
            .with_description("A gleaming sword")
            .with_kind(Kind::Weapon),
    )?;
    let vase = vocab.register_noun(
        Noun::builder("vase")
            .with_modifier("china")
            .with_description("A delicate china vase")
            .with_traits(Traits::of(&[Trait::Fragile]))
            .with_kind(Kind::Item),
    )?;
    let portrait = vocab.register_noun(
        Noun::builder("portrait")
            .with_alias("picture")
            .with_description("A portrait of a stern old gentleman glowers down from the wall.")
            .with_traits(Traits::of(&[Trait::Compelling]))
            .with_kind(Kind::Fixture),
    )?;
    let door = vocab.register_noun(
        Noun::builder("door")
            .with_modifier("sturdy")
            .with_description("A sturdy door leading out to the balcony above the tower")
            .with_kind(Kind::Door),
    )?;
    let table = vocab.register_noun(
        Noun::builder("table")
            .with_modifier("oak")
            .with_description("A sturdy oak table")
            .with_kind(Kind::Surface),
    )?;
    let villager = vocab.register_noun(
        Noun::builder("villager")
            .with_description("A hungry-looking villager")
            .with_traits(Traits::of(&[Trait::Friendly]))
            .with_kind(Kind::Creature),
    )?;

    let mut world = World::new();
    for r in [storeroom, hall, tower, balcony] {
        world.set_body(r, Body::Room);
    }
    world.set_body(player, Body::Creature { health: PLAYER_HEALTH });
    world.set_body(villager, Body::Creature { health: PLAYER_HEALTH });
    world.set_body(
        trunk,
        Body::Container {
            closed: true,
            locked: true,
        },
    );
    world.set_body(table, Body::open_container());
    world.set_body(
        door,
        Body::Door {
            closed: true,
            locked: false,
        },
    );
    world.set_capacity(player, PLAYER_CAPACITY);
    world.set_capacity(table, 15);
    for (thing, size) in [(apple, 5), (sword, 15), (vase, 5), (trunk, 75), (table, 20)] {
        world.set_size(thing, size);
    }
    world.set_damage(sword, 6);

    world.place(player, storeroom)?;
    world.place(apple, storeroom)?;
    world.place(golden_key, storeroom)?;
    world.place(trunk, hall)?;
    world.place(table, hall)?;
    world.place(sword, trunk)?;
    world.place(portrait, hall)?;
    world.place(vase, table)?;
    world.place(villager, tower)?;
    world.place(door, tower)?;
    world.place(bronze_key, villager)?;

    world.set_key(golden_key, trunk);
    world.set_key(bronze_key, trunk);
    world.add_want(villager, apple);

    for (from, direction, to) in [
        (storeroom, east, hall),
        (hall, west, storeroom),
        (hall, north, tower),
        (tower, south, hall),
        (tower, up, balcony),
        (balcony, down, tower),
    ] {
        world.add_exit(from, direction, to);
    }
    world.add_door(tower, up, door);

    let landmarks = Landmarks {
        player,
        storeroom,
        hall,
        tower,
        balcony,
        trunk,
        sword,
        golden_key,
        bronze_key,
        apple,
        villager,
        door,
        vase,
    };
    let mut interpreter = Interpreter::new(vocab);
    register_consequences(&mut interpreter, &landmarks)?;
    info!("demo world built");
    Ok((interpreter, world, landmarks))
}

fn room(name: &str, modifier: Option<&str>, description: &str) -> NounBuilder {
    let builder = Noun::builder(name).with_description(description);
    match modifier {
        Some(m) => builder.with_modifier(m),
        None => builder,
    }
}

fn register_consequences(interpreter: &mut Interpreter, l: &Landmarks) -> Result<()> {
    let alone = Schema::new().with(Role::Agent, l.player);

    // Be careful in precarious places!
    register_hazards(interpreter, l.player)?;

    // Achievement: open the trunk
    interpreter.register_consequence(
        "open",
        ConsequenceRule::when(alone.with(Role::Patient, l.trunk))
            .on_success()
            .with_effect(|_, scene| {
                scene.world.add_score(10);
                None
            }),
    )?;

    // The villager trades the bronze key for the apple
    interpreter.register_consequence(
        "give",
        ConsequenceRule::when(
            alone
                .with(Role::Patient, l.villager)
                .with(Role::Theme, l.apple),
        )
        .on_success()
        .with_effect(|_, scene| {
            scene.world.add_score(20);
            None
        }),
    )?;

    interpreter.register_consequence(
        "ask",
        ConsequenceRule::when(
            alone
                .with(Role::Patient, l.villager)
                .with(Role::Theme, l.bronze_key),
        )
        .on_success()
        .with_effect(|_, scene| {
            scene.world.add_score(20);
            None
        }),
    )?;

    Ok(())
}

/// Builds the demo game wrapped in a session.
///
/// # Errors
///
/// Returns an error if the content is inconsistent.
pub fn session(config: SessionConfig) -> Result<Session> {
    let (interpreter, world, landmarks) = build()?;
    Ok(Session::new(interpreter, world, landmarks.player, config))
}
