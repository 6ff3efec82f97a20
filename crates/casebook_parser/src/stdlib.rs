//! Standard library for adventure games.
//!
//! Contains the conventional verb set with its world effects, noun presets
//! that grant the usual role legality, the compass directions, and the
//! consequences that make precarious rooms dangerous.
//!
//! Registration order matters: legality grants name verbs, so the standard
//! actions must be registered before any noun built with [`Kind`].

use casebook_foundation::{EntityId, Outcome, Result, Role, Scope, Trait, Traits};
use casebook_world::{Mood, WorldError, WorldView};
use tracing::debug;

use crate::action::{Action, Scene};
use crate::consequence::ConsequenceRule;
use crate::parser::Interpreter;
use crate::schema::Schema;
use crate::vocabulary::{Noun, NounBuilder, Vocabulary};

const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that";

/// Compass and vertical directions with their abbreviations.
pub const DIRECTIONS: [(&str, &str); 10] = [
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("northeast", "ne"),
    ("northwest", "nw"),
    ("southeast", "se"),
    ("southwest", "sw"),
    ("up", "u"),
    ("down", "d"),
];

/// Noun presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Something portable that can be handed around.
    Item,
    /// Scenery: visible but going nowhere.
    Fixture,
    /// Holds things inside; can be opened and locked.
    Container,
    /// Holds things on top.
    Surface,
    /// Someone to give things to and ask things of.
    Creature,
    /// An item that opens locks.
    Key,
    /// An item to attack creatures with.
    Weapon,
    /// Gates an exit; opens and locks but holds nothing.
    Door,
    /// A compass direction, reachable from everywhere.
    Direction,
    /// An item that can be eaten.
    Edible,
    /// An item that can be drunk.
    Drinkable,
    /// The player: a legal agent of every verb.
    Player,
}

const ITEM_THEME: [&str; 6] = ["get", "drop", "put", "give", "ask", "throw"];
const CONTAINER_PATIENT: [&str; 6] = ["put", "get", "open", "close", "lock", "unlock"];
const DOOR_PATIENT: [&str; 4] = ["open", "close", "lock", "unlock"];
const CREATURE_PATIENT: [&str; 7] = ["give", "ask", "get", "greet", "smile", "wave", "kill"];

impl NounBuilder {
    /// Applies a noun preset: its traits and role legality.
    #[must_use]
    pub fn with_kind(self, kind: Kind) -> Self {
        match kind {
            Kind::Item => grant(
                self.with_traits(Traits::of(&[Trait::Portable, Trait::Evident, Trait::Visible])),
                Role::Theme,
                &ITEM_THEME,
            ),
            Kind::Fixture => self
                .with_traits(Traits::of(&[Trait::Visible, Trait::Evident]))
                .legal_for(Role::Goal, "throw"),
            Kind::Container => grant(
                self.with_kind(Kind::Fixture),
                Role::Patient,
                &CONTAINER_PATIENT,
            ),
            Kind::Surface => grant(
                self.with_kind(Kind::Fixture).with_traits(Traits::of(&[Trait::Surface])),
                Role::Patient,
                &["put", "get"],
            ),
            Kind::Creature => grant(
                self.with_kind(Kind::Fixture),
                Role::Patient,
                &CREATURE_PATIENT,
            ),
            Kind::Key => grant(self.with_kind(Kind::Item), Role::Instrument, &["lock", "unlock"]),
            Kind::Weapon => self.with_kind(Kind::Item).legal_for(Role::Instrument, "kill"),
            Kind::Door => grant(
                self.with_traits(Traits::of(&[Trait::Visible, Trait::Evident])),
                Role::Patient,
                &DOOR_PATIENT,
            ),
            Kind::Direction => self
                .with_traits(Traits::of(&[Trait::Ubiquitous]))
                .legal_for(Role::Goal, "go"),
            Kind::Edible => self.with_kind(Kind::Item).legal_for(Role::Theme, "eat"),
            Kind::Drinkable => self.with_kind(Kind::Item).legal_for(Role::Theme, "drink"),
            Kind::Player => self.with_traits(Traits::of(&[Trait::Visible])).legal_for_any(Role::Agent),
        }
    }
}

fn grant(builder: NounBuilder, role: Role, verbs: &[&str]) -> NounBuilder {
    verbs.iter().fold(builder, |b, verb| b.legal_for(role, *verb))
}

/// A vocabulary with the standard verbs and directions registered.
///
/// # Errors
///
/// Returns an error if registration fails, which only happens if the
/// standard definitions themselves are inconsistent.
pub fn standard_vocabulary() -> Result<Vocabulary> {
    let mut vocabulary = Vocabulary::new();
    register_standard_actions(&mut vocabulary)?;
    register_directions(&mut vocabulary)?;
    Ok(vocabulary)
}

/// Registers the standard verb set.
///
/// # Errors
///
/// Returns an error if a verb is already registered.
pub fn register_standard_actions(vocabulary: &mut Vocabulary) -> Result<()> {
    for action in [
        look()?,
        get()?,
        drop_action()?,
        put()?,
        open()?,
        close()?,
        lock(true)?,
        lock(false)?,
        give()?,
        ask()?,
        go()?,
        jump()?,
        wait()?,
        inventory()?,
        smell()?,
        eat()?,
        drink()?,
        greet("greet", &[])?,
        greet("smile", &["at"])?,
        greet("wave", &["at", "to"])?,
        kill()?,
        throw()?,
        listen()?,
        admire()?,
        diagnose()?,
    ] {
        vocabulary.register_action(action)?;
    }
    debug!(verbs = vocabulary.verb_names().count(), "standard actions registered");
    Ok(())
}

/// Registers the direction nouns and a movement verb for each.
///
/// Returns the direction nouns in [`DIRECTIONS`] order.
///
/// # Errors
///
/// Returns an error if `go` is not registered yet or a direction verb is
/// already taken.
pub fn register_directions(vocabulary: &mut Vocabulary) -> Result<[EntityId; DIRECTIONS.len()]> {
    let mut ids = [EntityId::new(0); DIRECTIONS.len()];
    for (slot, (name, short)) in ids.iter_mut().zip(DIRECTIONS) {
        let id = vocabulary.register_noun(
            NounBuilder::new(name)
                .with_alias(short)
                .with_kind(Kind::Direction),
        )?;
        vocabulary.register_action(
            Action::builder(name)
                .with_aliases(&[short])
                .with_effect(move |schema, scene| {
                    with_agent(schema, |agent| travel(scene, agent, id))
                })
                .build()?,
        )?;
        *slot = id;
    }
    Ok(ids)
}

/// Makes every precarious room dangerous for the player: jumping there is
/// fatal and anything thrown sails over the edge.
///
/// Call once the rooms and portable items are registered.
///
/// # Errors
///
/// Returns an error if `jump` or `throw` is not registered.
pub fn register_hazards(interpreter: &mut Interpreter, player: EntityId) -> Result<()> {
    let vocabulary = interpreter.vocabulary();
    let precarious: Vec<EntityId> = nouns_with(vocabulary, Trait::Precarious);
    let portable: Vec<EntityId> = nouns_with(vocabulary, Trait::Portable);
    let alone = Schema::new().with(Role::Agent, player);

    for room in precarious {
        interpreter.register_consequence(
            "jump",
            ConsequenceRule::when(alone)
                .on_success()
                .at(room)
                .with_effect(move |_, scene| {
                    scene.world.set_health(player, 0).ok()?;
                    None
                })
                .with_result(Outcome::success(
                    "In your excitement, you slip and fall to the hard ground far below!\n\
                     You should probably be more careful where you do your jumping.",
                )),
        )?;
        for &item in &portable {
            interpreter.register_consequence(
                "throw",
                ConsequenceRule::when(alone.with(Role::Theme, item))
                    .on_failure()
                    .at(room)
                    .with_effect(move |_, scene| {
                        scene.world.remove(item);
                        None
                    })
                    .with_result(Outcome::failure(
                        "You toss it carelessly, and it sails over the edge and out of sight",
                    )),
            )?;
        }
    }
    Ok(())
}

fn nouns_with(vocabulary: &Vocabulary, t: Trait) -> Vec<EntityId> {
    vocabulary
        .nouns()
        .filter(|noun| noun.traits().has(t))
        .map(Noun::id)
        .collect()
}

// --- Definitions ---

fn look() -> Result<Action> {
    Action::builder("look")
        .with_aliases(&["l"])
        .with_direct_object(Role::Theme)
        .with_preposition("at", Role::Theme)
        .with_preposition("in", Role::Theme)
        .with_preposition("on", Role::Theme)
        .with_effect(effect(look_effect))
        .build()
}

fn get() -> Result<Action> {
    Action::builder("get")
        .with_aliases(&["take"])
        .with_direct_object(Role::Theme)
        .with_preposition("from", Role::Patient)
        .with_required(&[Role::Theme])
        .with_scope(Role::Theme, Scope::External)
        .with_scope(Role::Patient, Scope::External)
        .with_message(Role::Theme, "Admire the {} all you want, you can't take it with you.")
        .with_effect(effect(get_effect))
        .build()
}

fn drop_action() -> Result<Action> {
    Action::builder("drop")
        .with_aliases(&["leave"])
        .with_direct_object(Role::Theme)
        .with_required(&[Role::Theme])
        .with_scope(Role::Theme, Scope::Inventory)
        .with_effect(effect(drop_effect))
        .build()
}

fn put() -> Result<Action> {
    Action::builder("put")
        .with_direct_object(Role::Theme)
        .with_preposition("in", Role::Patient)
        .with_preposition("into", Role::Patient)
        .with_preposition("on", Role::Patient)
        .with_required(&[Role::Patient, Role::Theme])
        .with_scope(Role::Theme, Scope::Proximity)
        .with_effect(effect(put_effect))
        .build()
}

fn open() -> Result<Action> {
    Action::builder("open")
        .with_direct_object(Role::Patient)
        .with_required(&[Role::Patient])
        .with_effect(effect(open_effect))
        .build()
}

fn close() -> Result<Action> {
    Action::builder("close")
        .with_aliases(&["shut"])
        .with_direct_object(Role::Patient)
        .with_required(&[Role::Patient])
        .with_effect(effect(close_effect))
        .build()
}

fn lock(locking: bool) -> Result<Action> {
    let name = if locking { "lock" } else { "unlock" };
    Action::builder(name)
        .with_direct_object(Role::Patient)
        .with_preposition("with", Role::Instrument)
        .with_required(&[Role::Patient, Role::Instrument])
        .with_effect(move |schema, scene| {
            lock_effect(schema, scene, locking).unwrap_or_else(|| Outcome::failure(NOT_UNDERSTOOD))
        })
        .build()
}

fn give() -> Result<Action> {
    Action::builder("give")
        .with_aliases(&["offer"])
        .with_direct_object(Role::Theme)
        .with_indirect_object(Role::Patient)
        .with_preposition("to", Role::Patient)
        .with_required(&[Role::Patient, Role::Theme])
        .with_scope(Role::Theme, Scope::Inventory)
        .with_effect(effect(give_effect))
        .build()
}

fn ask() -> Result<Action> {
    Action::builder("ask")
        .with_direct_object(Role::Patient)
        .with_preposition("for", Role::Theme)
        .with_required(&[Role::Patient, Role::Theme])
        .with_effect(effect(ask_effect))
        .build()
}

fn go() -> Result<Action> {
    Action::builder("go")
        .with_aliases(&["walk"])
        .with_direct_object(Role::Goal)
        .with_required(&[Role::Goal])
        .with_message(Role::Goal, "That's not a direction!")
        .with_effect(effect(|schema, scene| {
            let agent = schema.get(Role::Agent)?;
            let direction = schema.get(Role::Goal)?;
            Some(travel(scene, agent, direction))
        }))
        .build()
}

fn jump() -> Result<Action> {
    Action::builder("jump")
        .with_effect(|_, _| {
            Outcome::success("You take a great leap into the air")
                .with_variant("Wheeeeeee!")
                .with_variant("Boing boing boing ...")
                .with_variant("Up, up and away!")
        })
        .build()
}

fn wait() -> Result<Action> {
    Action::builder("wait")
        .with_effect(|_, _| Outcome::success("Time passes..."))
        .build()
}

fn inventory() -> Result<Action> {
    Action::builder("inventory")
        .with_aliases(&["i"])
        .with_effect(effect(|schema, scene| {
            let agent = schema.get(Role::Agent)?;
            let held: Vec<EntityId> = scene.world.contents(agent).collect();
            if held.is_empty() {
                return Some(Outcome::success("You're not carrying anything"));
            }
            let mut outcome = Outcome::success("You are carrying:");
            for item in held {
                outcome.append(&format!("\n\t{}", a_name(scene, item)));
            }
            Some(outcome)
        }))
        .build()
}

fn smell() -> Result<Action> {
    Action::builder("smell")
        .with_direct_object(Role::Theme)
        .with_required(&[Role::Theme])
        .with_permissive(&[Role::Theme])
        .with_effect(effect(|schema, scene| {
            let theme = schema.get(Role::Theme)?;
            Some(Outcome::success(format!("Smells like {} to me!", a_name(scene, theme))))
        }))
        .build()
}

fn eat() -> Result<Action> {
    Action::builder("eat")
        .with_direct_object(Role::Theme)
        .with_required(&[Role::Theme])
        .with_message(Role::Theme, "I don't think the {} would agree with you.")
        .with_effect(effect(|schema, scene| {
            let theme = schema.get(Role::Theme)?;
            scene.world.remove(theme);
            Some(Outcome::success(format!("You eat the delicious {}", scene.name(theme))))
        }))
        .build()
}

fn drink() -> Result<Action> {
    Action::builder("drink")
        .with_direct_object(Role::Theme)
        .with_required(&[Role::Theme])
        .with_message(Role::Theme, "I don't think the {} would agree with you.")
        .with_effect(effect(|schema, scene| {
            let theme = schema.get(Role::Theme)?;
            scene.world.remove(theme);
            Some(Outcome::success(format!("You drink the refreshing {}", scene.name(theme))))
        }))
        .build()
}

fn greet(name: &str, prepositions: &[&str]) -> Result<Action> {
    let builder = if prepositions.is_empty() {
        Action::builder(name).with_direct_object(Role::Patient)
    } else {
        Action::builder(name)
    };
    prepositions
        .iter()
        .fold(builder, |b, p| b.with_preposition(*p, Role::Patient))
        .with_required(&[Role::Patient])
        .with_effect(effect(greet_effect))
        .build()
}

fn kill() -> Result<Action> {
    Action::builder("kill")
        .with_aliases(&["attack", "fight", "hit"])
        .with_direct_object(Role::Patient)
        .with_preposition("with", Role::Instrument)
        .with_required(&[Role::Patient, Role::Instrument])
        .with_message(Role::Instrument, "The {} proves an ineffective choice of weapon")
        .with_effect(effect(kill_effect))
        .build()
}

fn throw() -> Result<Action> {
    Action::builder("throw")
        .with_aliases(&["toss", "pitch", "fling", "lob"])
        .with_direct_object(Role::Theme)
        .with_preposition("at", Role::Goal)
        .with_preposition("to", Role::Goal)
        .with_required(&[Role::Theme])
        .with_scope(Role::Theme, Scope::Inventory)
        .with_message(Role::Theme, "The {} is too unwieldy to make an effective missile")
        .with_message(Role::Goal, "The {} is not intended for target practice!")
        .with_effect(effect(throw_effect))
        .build()
}

fn listen() -> Result<Action> {
    Action::builder("listen")
        .with_preposition("to", Role::Theme)
        .with_required(&[Role::Theme])
        .with_permissive(&[Role::Theme])
        .with_effect(effect(|schema, scene| {
            let theme = schema.get(Role::Theme)?;
            Some(Outcome::success(format!(
                "The {} is keeping pretty quiet right now",
                scene.name(theme)
            )))
        }))
        .build()
}

fn admire() -> Result<Action> {
    Action::builder("admire")
        .with_aliases(&["appreciate"])
        .with_direct_object(Role::Theme)
        .with_required(&[Role::Theme])
        .with_permissive(&[Role::Theme])
        .with_effect(|_, _| {
            Outcome::success("Breathtaking! You feel enriched by this profound artistic experience.")
        })
        .build()
}

fn diagnose() -> Result<Action> {
    Action::builder("diagnose")
        .with_effect(effect(|schema, scene| {
            let health = scene.world.health(schema.get(Role::Agent)?)?;
            Some(Outcome::success(format!("Health: {health}")))
        }))
        .build()
}

// --- Effects ---

type EffectFn = fn(&Schema, &mut Scene<'_>) -> Option<Outcome>;

/// Adapts an effect that bails out on a missing role.
fn effect(f: EffectFn) -> impl Fn(&Schema, &mut Scene<'_>) -> Outcome + Send + Sync + 'static {
    move |schema: &Schema, scene: &mut Scene<'_>| {
        f(schema, scene).unwrap_or_else(|| Outcome::failure(NOT_UNDERSTOOD))
    }
}

fn with_agent(schema: &Schema, f: impl FnOnce(EntityId) -> Outcome) -> Outcome {
    schema
        .get(Role::Agent)
        .map_or_else(|| Outcome::failure(NOT_UNDERSTOOD), f)
}

/// "a golden key", "some crumbs".
fn a_name(scene: &Scene<'_>, entity: EntityId) -> String {
    format!("{} {}", scene.vocabulary.article(entity), scene.name(entity))
}

fn look_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    match schema.get(Role::Theme) {
        Some(theme) => Some(describe_thing(scene, theme)),
        None => {
            let room = scene.world.location_of(agent)?;
            Some(describe_room(scene, agent, room))
        }
    }
}

fn describe_room(scene: &Scene<'_>, agent: EntityId, room: EntityId) -> Outcome {
    let description = scene
        .vocabulary
        .noun(room)
        .and_then(|noun| noun.description())
        .unwrap_or_default();
    let mut outcome = Outcome::success(format!(
        "------ {} ------\n\n{description}",
        scene.name(room)
    ));
    let present: Vec<(EntityId, Traits)> = scene
        .world
        .contents(room)
        .filter(|e| *e != agent)
        .filter_map(|e| scene.vocabulary.noun(e).map(|noun| (e, noun.traits())))
        .collect();

    for &(item, _) in present.iter().filter(|(_, t)| t.has(Trait::Compelling)) {
        let sentence = scene
            .vocabulary
            .noun(item)
            .and_then(|noun| noun.description())
            .map_or_else(|| format!("You notice {}.", a_name(scene, item)), str::to_string);
        outcome.append(&format!("\n{sentence}"));
    }
    for &(item, _) in present
        .iter()
        .filter(|(_, t)| t.has(Trait::Evident) && !t.has(Trait::Compelling))
    {
        outcome.append(&format!(
            "\nThere {} {} here.",
            scene.vocabulary.existential(item),
            a_name(scene, item)
        ));
    }
    outcome
}

fn describe_thing(scene: &Scene<'_>, entity: EntityId) -> Outcome {
    let mut outcome = Outcome::success(
        scene
            .vocabulary
            .noun(entity)
            .and_then(|noun| noun.description())
            .map_or_else(
                || format!("You see nothing special about the {}", scene.name(entity)),
                str::to_string,
            ),
    );
    let world = &*scene.world;
    if world.is_closed(entity) == Some(true) && world.is_container(entity) {
        outcome.append(", which is currently closed");
        return outcome;
    }
    let verb = if world.is_creature(entity) { "carrying" } else { "containing" };
    let held: Vec<EntityId> = world.contents(entity).collect();
    match held.as_slice() {
        [] => {}
        [only] => outcome.append(&format!(", {verb} {}", a_name(scene, *only))),
        many => {
            outcome.append(&format!(", {verb}: "));
            for item in many {
                outcome.append(&format!("\n\t{}", a_name(scene, *item)));
            }
        }
    }
    outcome
}

fn get_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    let theme = schema.get(Role::Theme)?;
    let name = scene.name(theme);

    let portable = scene
        .vocabulary
        .noun(theme)
        .is_some_and(|noun| noun.traits().has(Trait::Portable));
    if !portable {
        return Some(Outcome::failure(format!("You can't carry around the {name}!")));
    }
    if scene.world.held_by(agent, theme) {
        return Some(Outcome::failure(format!("You already have the {name}!")));
    }

    let source = schema.get(Role::Patient).or_else(|| scene.world.parent(theme))?;
    if scene.world.is_creature(source) && source != agent {
        return Some(hand_over(scene, agent, source, theme));
    }
    if !scene.world.contains(source, theme) {
        return Some(Outcome::failure(format!(
            "The {name} isn't in the {}",
            scene.name(source)
        )));
    }

    let from_room = scene.world.is_room(source);
    Some(match scene.world.move_to(theme, agent) {
        Ok(()) if from_room => Outcome::success(format!("You take the {name}")),
        Ok(()) => Outcome::success(format!("You take the {name} from the {}", scene.name(source))),
        Err(err) => world_failure(scene, &err),
    })
}

fn drop_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    let theme = schema.get(Role::Theme)?;
    let room = scene.world.location_of(agent)?;
    Some(match scene.world.move_to(theme, room) {
        Ok(()) => Outcome::success(format!("You drop the {}", scene.name(theme))),
        Err(err) => world_failure(scene, &err),
    })
}

fn put_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let theme = schema.get(Role::Theme)?;
    let patient = schema.get(Role::Patient)?;
    let on = scene
        .vocabulary
        .noun(patient)
        .is_some_and(|noun| noun.traits().has(Trait::Surface));
    let preposition = if on { "on" } else { "in" };

    if theme == patient {
        return Some(Outcome::failure(format!(
            "You can't put the {} {preposition} itself!",
            scene.name(patient)
        )));
    }
    Some(match scene.world.move_to(theme, patient) {
        Ok(()) => Outcome::success(format!(
            "The {} {} now {preposition} the {}",
            scene.name(theme),
            scene.vocabulary.existential(theme),
            scene.name(patient)
        )),
        Err(err) => world_failure(scene, &err),
    })
}

fn open_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let patient = schema.get(Role::Patient)?;
    let name = scene.name(patient);
    let Some(closed) = scene.world.is_closed(patient) else {
        return Some(Outcome::failure(format!("The {name} cannot be opened")));
    };
    if !closed {
        return Some(Outcome::failure(format!("The {name} is already open")));
    }
    if scene.world.is_locked(patient) == Some(true) {
        return Some(Outcome::failure(format!(
            "You try to open the {name}, but it is firmly locked"
        )));
    }
    if let Err(err) = scene.world.set_closed(patient, false) {
        return Some(world_failure(scene, &err));
    }
    if !scene.world.is_container(patient) {
        return Some(Outcome::success(format!("You open the {name}")));
    }

    let held: Vec<EntityId> = scene.world.contents(patient).collect();
    Some(match held.as_slice() {
        [] => Outcome::success(format!("You open the {name}, which is empty")),
        [only] => Outcome::success(format!("Opening the {name} reveals {}", a_name(scene, *only))),
        many => {
            let mut outcome = Outcome::success(format!("Opening the {name} reveals: "));
            for item in many {
                outcome.append(&format!("\n\t{}", a_name(scene, *item)));
            }
            outcome
        }
    })
}

fn close_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let patient = schema.get(Role::Patient)?;
    let name = scene.name(patient);
    Some(match scene.world.is_closed(patient) {
        None => Outcome::failure(format!("The {name} cannot be closed")),
        Some(true) => Outcome::failure(format!("The {name} is already closed")),
        Some(false) => match scene.world.set_closed(patient, true) {
            Ok(()) => Outcome::success(format!("You close the {name}")),
            Err(err) => world_failure(scene, &err),
        },
    })
}

fn lock_effect(schema: &Schema, scene: &mut Scene<'_>, locking: bool) -> Option<Outcome> {
    let patient = schema.get(Role::Patient)?;
    let key = schema.get(Role::Instrument)?;
    let name = scene.name(patient);
    let state = if locking { "locked" } else { "unlocked" };

    let Some(locked) = scene.world.is_locked(patient) else {
        return Some(Outcome::failure(format!("The {name} has no lock")));
    };
    if locked == locking {
        return Some(Outcome::failure(format!("The {name} is already {state}")));
    }
    if !scene.world.key_fits(key, patient) {
        return Some(Outcome::failure(format!(
            "The {name} cannot be {state} with the {}!",
            scene.name(key)
        )));
    }
    if locking && scene.world.is_closed(patient) == Some(false) {
        return Some(Outcome::failure(format!("You have to close the {name} first")));
    }
    Some(match scene.world.set_locked(patient, locking) {
        Ok(()) => Outcome::success(format!("The {name} is now {state}")),
        Err(err) => world_failure(scene, &err),
    })
}

fn give_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    let theme = schema.get(Role::Theme)?;
    let patient = schema.get(Role::Patient)?;
    let (item, creature) = (scene.name(theme), scene.name(patient));

    if !scene.world.held_by(agent, theme) {
        return Some(Outcome::failure(format!("You don't have the {item}!")));
    }
    if !scene.world.wants(patient, theme) {
        return Some(Outcome::failure(format!(
            "The {creature} politely declines to take the {item}"
        )));
    }
    Some(match scene.world.move_to(theme, patient) {
        Ok(()) => {
            scene.world.set_mood(patient, Mood::Friendly);
            Outcome::success(format!("The {creature} gratefully accepts the {item}"))
        }
        Err(err) => world_failure(scene, &err),
    })
}

fn ask_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    let theme = schema.get(Role::Theme)?;
    let patient = schema.get(Role::Patient)?;
    Some(hand_over(scene, agent, patient, theme))
}

/// How a creature feels right now: a mood set during play wins over the
/// disposition it started with.
fn mood(scene: &Scene<'_>, creature: EntityId) -> Option<Mood> {
    scene.world.mood(creature).or_else(|| {
        let traits = scene.vocabulary.noun(creature)?.traits();
        if traits.has(Trait::Hostile) {
            Some(Mood::Hostile)
        } else if traits.has(Trait::Friendly) {
            Some(Mood::Friendly)
        } else {
            None
        }
    })
}

/// A creature handing an item it carries to the agent. It keeps
/// everything while hostile or while it still wants something.
fn hand_over(scene: &mut Scene<'_>, agent: EntityId, creature: EntityId, item: EntityId) -> Outcome {
    let (who, what) = (scene.name(creature), scene.name(item));
    if !scene.world.contains(creature, item) {
        return Outcome::failure(format!("The {who} doesn't have the {what}"));
    }
    let unwilling = mood(scene, creature) == Some(Mood::Hostile)
        || scene.world.wants(creature, item)
        || !scene.world.satisfied(creature);
    if unwilling {
        return Outcome::failure(format!("The {who} is unwilling to part with the {what}"));
    }
    match scene.world.move_to(item, agent) {
        Ok(()) => Outcome::success(format!("The {who} gladly hands over the {what} to you")),
        Err(err) => world_failure(scene, &err),
    }
}

fn greet_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let patient = schema.get(Role::Patient)?;
    let name = scene.name(patient);
    Some(Outcome::success(match mood(scene, patient) {
        Some(Mood::Hostile) => format!("The {name} snorts derisively at your greeting"),
        Some(Mood::Friendly) => format!("The {name} gives you a friendly wave in return"),
        None => format!("The {name} acknowledges your greeting with a curt nod"),
    }))
}

fn kill_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    let patient = schema.get(Role::Patient)?;
    let weapon = schema.get(Role::Instrument)?;
    let name = scene.name(patient);

    if !scene.world.held_by(agent, weapon) {
        return Some(Outcome::failure(format!("You don't have the {}!", scene.name(weapon))));
    }
    scene.world.set_mood(patient, Mood::Hostile);
    let damage = scene.world.damage(weapon);
    let health = match scene.world.adjust_health(patient, -damage) {
        Ok(health) => health,
        Err(err) => return Some(world_failure(scene, &err)),
    };
    if health > 0 {
        return Some(Outcome::success(format!("You hit the {name}. It reels from your attack!")));
    }

    let room = scene.world.parent(patient)?;
    let dropped: Vec<EntityId> = scene.world.contents(patient).collect();
    for item in dropped {
        if let Err(err) = scene.world.place(item, room) {
            return Some(world_failure(scene, &err));
        }
    }
    scene.world.remove(patient);
    debug!(%patient, %room, "creature killed");
    Some(Outcome::success(format!(
        "You deal the {name} a fatal blow. It falls to the ground dead, \
         and its body dissolves into the hungry earth"
    )))
}

/// Throwing never hits anything; the outcome is always a failure so
/// location rules can react to it.
fn throw_effect(schema: &Schema, scene: &mut Scene<'_>) -> Option<Outcome> {
    let agent = schema.get(Role::Agent)?;
    let theme = schema.get(Role::Theme)?;
    let name = scene.name(theme);
    if !scene.world.held_by(agent, theme) {
        return Some(Outcome::failure(format!("You don't have the {name}!")));
    }
    let room = scene.world.location_of(agent)?;

    let (verb, landing, untargeted, mut result) = match scene.world.size(theme) {
        size if size > 30 => ("heave", "falls to the ground", "into the air", "with a solid thunk"),
        size if size > 10 => ("lob", "hits the ground", "across the room", "and rolls to a stop"),
        _ => ("toss", "comes back down", "into the air", "with a soft plop"),
    };
    let direction = schema.get(Role::Goal).map_or_else(
        || untargeted.to_string(),
        |target| format!("at the {}, but miss", scene.name(target)),
    );

    let fragile = scene
        .vocabulary
        .noun(theme)
        .is_some_and(|noun| noun.traits().has(Trait::Fragile));
    if fragile {
        result = "and smashes to bits";
        scene.world.remove(theme);
    } else if let Err(err) = scene.world.move_to(theme, room) {
        return Some(world_failure(scene, &err));
    }
    Some(Outcome::failure(format!(
        "You {verb} the {name} {direction}; it {landing} {result}"
    )))
}

fn travel(scene: &mut Scene<'_>, agent: EntityId, direction: EntityId) -> Outcome {
    let Some(room) = scene.world.location_of(agent) else {
        return Outcome::failure(NOT_UNDERSTOOD);
    };
    let Some(destination) = scene.world.exit(room, direction) else {
        return Outcome::failure(format!("You can't go {} from here", scene.name(direction)));
    };
    if let Some(door) = scene.world.door(room, direction) {
        if scene.world.is_locked(door) == Some(true) {
            return Outcome::failure(format!("The {} is locked", scene.name(door)));
        }
        if scene.world.is_closed(door) == Some(true) {
            return Outcome::failure(format!("The {} is closed", scene.name(door)));
        }
    }
    match scene.world.move_to(agent, destination) {
        Ok(()) => {
            debug!(%agent, %room, %destination, "moved");
            describe_room(scene, agent, destination)
        }
        Err(err) => world_failure(scene, &err),
    }
}

fn world_failure(scene: &Scene<'_>, err: &WorldError) -> Outcome {
    debug!(error = %err, "world refused the change");
    match err {
        WorldError::Closed(holder) => Outcome::failure(format!("The {} is closed", scene.name(*holder))),
        WorldError::NoRoom { holder, entity } if scene.world.is_creature(*holder) => {
            Outcome::failure(format!("Your load is too heavy to pick up the {}", scene.name(*entity)))
        }
        WorldError::NoRoom { holder, entity } => {
            let on = scene
                .vocabulary
                .noun(*holder)
                .is_some_and(|noun| noun.traits().has(Trait::Surface));
            Outcome::failure(format!(
                "Sorry, the {} won't fit {} the {}",
                scene.name(*entity),
                if on { "on" } else { "in" },
                scene.name(*holder)
            ))
        }
        _ => Outcome::failure(NOT_UNDERSTOOD),
    }
}
