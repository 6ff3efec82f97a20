//! Whole-command scenarios against a small standard-library world.

use casebook_foundation::{EntityId, Outcome, Role, Scope, Trait, Traits};
use casebook_parser::stdlib::Kind;
use casebook_parser::{
    Action, CommandError, ConsequenceRule, Interpreter, Noun, NounBuilder, Schema, Vocabulary, standard_vocabulary,
};
use casebook_world::{Body, World, WorldView};

struct Room {
    interpreter: Interpreter,
    world: World,
    player: EntityId,
    room: EntityId,
}

impl Room {
    /// A room holding the player, built on the standard vocabulary.
    fn standard(traits: Traits) -> (Vocabulary, World, EntityId, EntityId) {
        let mut vocab = standard_vocabulary().unwrap();
        let player = vocab
            .register_noun(Noun::builder("player").with_kind(Kind::Player))
            .unwrap();
        let room = vocab
            .register_noun(Noun::builder("room").with_traits(traits))
            .unwrap();
        let mut world = World::new();
        world.set_body(room, Body::Room);
        world.set_body(player, Body::Creature { health: 10 });
        world.place(player, room).unwrap();
        (vocab, world, player, room)
    }

    fn run(&mut self, input: &str) -> Result<Outcome, CommandError> {
        self.interpreter.try_interpret(input, self.player, &mut self.world)
    }
}

fn noun(vocab: &mut Vocabulary, builder: NounBuilder) -> EntityId {
    vocab.register_noun(builder).unwrap()
}

// =============================================================================
// Taking things
// =============================================================================

#[test]
fn get_apple_moves_it_to_inventory() {
    let (mut vocab, mut world, player, room) = Room::standard(Traits::none());
    let apple = noun(&mut vocab, Noun::builder("apple").with_kind(Kind::Edible));
    world.place(apple, room).unwrap();
    let mut r = Room {
        interpreter: Interpreter::new(vocab),
        world,
        player,
        room,
    };

    let command = r.interpreter.prepare("get apple", player, &r.world).unwrap();
    assert_eq!(command.schema.get(Role::Theme), Some(apple));

    let outcome = r.run("get apple").unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.message(), "You take the apple");
    assert!(r.world.held_by(player, apple));
    assert!(!r.world.contains(r.room, apple));
}

#[test]
fn closed_chest_hides_the_sword() {
    let (mut vocab, mut world, player, room) = Room::standard(Traits::none());
    let chest = noun(&mut vocab, Noun::builder("chest").with_kind(Kind::Container));
    let sword = noun(&mut vocab, Noun::builder("sword").with_kind(Kind::Item));
    world.set_body(
        chest,
        Body::Container {
            closed: true,
            locked: false,
        },
    );
    world.place(chest, room).unwrap();
    world.place(sword, chest).unwrap();
    let mut r = Room {
        interpreter: Interpreter::new(vocab),
        world,
        player,
        room,
    };

    let err = r.run("get sword").unwrap_err();
    assert_eq!(
        err,
        CommandError::Proximity {
            name: "sword".into()
        }
    );
    assert_eq!(err.to_string(), "I don't see any sword here");

    r.run("open chest").unwrap();
    assert_eq!(r.run("get sword").unwrap().message(), "You take the sword from the chest");
}

// =============================================================================
// Resolution by scope
// =============================================================================

#[test]
fn held_key_wins_over_key_in_chest() {
    let mut vocab = Vocabulary::new();
    vocab
        .register_action(
            Action::builder("unlock")
                .with_direct_object(Role::Patient)
                .with_preposition("with", Role::Instrument)
                .with_required(&[Role::Patient, Role::Instrument])
                .with_scope(Role::Instrument, Scope::Inventory)
                .build()
                .unwrap(),
        )
        .unwrap();
    let player = noun(&mut vocab, Noun::builder("player").legal_for_any(Role::Agent));
    let room = noun(&mut vocab, Noun::builder("room"));
    let gate = noun(&mut vocab, Noun::builder("gate").legal_for(Role::Patient, "unlock"));
    let chest = noun(&mut vocab, Noun::builder("chest"));
    let golden = noun(
        &mut vocab,
        Noun::builder("key")
            .with_modifier("golden")
            .legal_for(Role::Instrument, "unlock"),
    );
    let bronze = noun(
        &mut vocab,
        Noun::builder("key")
            .with_modifier("bronze")
            .legal_for(Role::Instrument, "unlock"),
    );

    let mut world = World::new();
    world.set_body(room, Body::Room);
    world.set_body(player, Body::Creature { health: 10 });
    world.set_body(chest, Body::open_container());
    world.place(player, room).unwrap();
    world.place(gate, room).unwrap();
    world.place(chest, room).unwrap();
    world.place(golden, player).unwrap();
    world.place(bronze, chest).unwrap();

    let interpreter = Interpreter::new(vocab);
    assert_eq!(interpreter.vocabulary().lookup_nouns_by_name("key"), &[golden, bronze]);

    let command = interpreter
        .prepare("unlock gate with key", player, &world)
        .unwrap();
    assert_eq!(command.schema.get(Role::Patient), Some(gate));
    assert_eq!(command.schema.get(Role::Instrument), Some(golden));

    // Once the golden key is gone, the bronze one is out of the inventory.
    world.move_to(golden, room).unwrap();
    let err = interpreter
        .prepare("unlock gate with key", player, &world)
        .unwrap_err();
    assert!(matches!(err, CommandError::Ownership { .. }));
}

#[test]
fn give_binds_theme_and_patient() {
    let (mut vocab, mut world, player, room) = Room::standard(Traits::none());
    let apple = noun(&mut vocab, Noun::builder("apple").with_kind(Kind::Edible));
    let villager = noun(
        &mut vocab,
        Noun::builder("villager")
            .with_traits(Traits::of(&[Trait::Friendly]))
            .with_kind(Kind::Creature),
    );
    world.set_body(villager, Body::Creature { health: 10 });
    world.place(villager, room).unwrap();
    world.place(apple, player).unwrap();
    world.add_want(villager, apple);
    let interpreter = Interpreter::new(vocab);

    let command = interpreter
        .prepare("give apple to villager", player, &world)
        .unwrap();
    assert_eq!(
        command.schema,
        Schema::new()
            .with(Role::Agent, player)
            .with(Role::Patient, villager)
            .with(Role::Theme, apple)
    );
    assert_eq!(interpreter.validate(command.action, &command.schema), Ok(()));

    // The ditransitive form binds the same roles.
    let ditransitive = interpreter
        .prepare("give villager apple", player, &world)
        .unwrap();
    assert_eq!(ditransitive.schema, command.schema);

    let outcome = interpreter
        .execute(command.action, &command.schema, &mut world)
        .unwrap();
    assert_eq!(outcome.message(), "The villager gratefully accepts the apple");
    assert!(world.contains(villager, apple));
}

#[test]
fn two_plain_keys_are_ambiguous() {
    let (mut vocab, mut world, player, room) = Room::standard(Traits::none());
    let first = noun(&mut vocab, Noun::builder("key").with_kind(Kind::Key));
    let second = noun(&mut vocab, Noun::builder("key").with_kind(Kind::Key));
    world.place(first, room).unwrap();
    world.place(second, room).unwrap();
    let mut r = Room {
        interpreter: Interpreter::new(vocab),
        world,
        player,
        room,
    };

    let err = r.run("get key").unwrap_err();
    let CommandError::Ambiguous(candidates) = &err else {
        panic!("expected an ambiguous reference, got {err:?}");
    };
    let entities: Vec<EntityId> = candidates.iter().map(|c| c.entity).collect();
    assert_eq!(entities, vec![first, second]);
    assert_eq!(err.to_string(), "Which do you mean, the key or the key?");
    assert!(!r.world.held_by(player, first));
    assert!(!r.world.held_by(player, second));
}

// =============================================================================
// Consequences
// =============================================================================

#[test]
fn jumping_in_a_precarious_room_is_fatal() {
    const FALL: &str = "You slip and fall to the ground far below!";

    let (vocab, world, player, room) = Room::standard(Traits::of(&[Trait::Precarious]));
    let mut r = Room {
        interpreter: Interpreter::new(vocab),
        world,
        player,
        room,
    };
    r.interpreter
        .register_consequence(
            "jump",
            ConsequenceRule::when(Schema::new().with(Role::Agent, player))
                .on_success()
                .at(room)
                .with_effect(move |_, scene| {
                    scene.world.set_health(player, 0).ok()?;
                    None
                })
                .with_result(Outcome::success(FALL)),
        )
        .unwrap();

    let outcome = r.run("jump").unwrap();
    assert_eq!(outcome, Outcome::success(FALL));
    assert_eq!(r.world.health(player), Some(0));
}

#[test]
fn jumping_elsewhere_is_plain() {
    let (mut vocab, mut world, player, room) = Room::standard(Traits::none());
    let cliff = noun(&mut vocab, Noun::builder("cliff"));
    world.set_body(cliff, Body::Room);
    let mut r = Room {
        interpreter: Interpreter::new(vocab),
        world,
        player,
        room,
    };
    r.interpreter
        .register_consequence(
            "jump",
            ConsequenceRule::when(Schema::new().with(Role::Agent, player))
                .on_success()
                .at(cliff)
                .with_result(Outcome::success("Splat")),
        )
        .unwrap();

    let outcome = r.run("jump").unwrap();
    assert_eq!(outcome.message(), "You take a great leap into the air");
    assert_eq!(r.world.health(player), Some(10));
}
