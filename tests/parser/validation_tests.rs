//! Action validation tests.
//!
//! Tests for checking schemas against a verb's role contract.

use casebook_foundation::{EntityId, ErrorKind, Role, RoleSet};
use casebook_parser::{Action, CommandError, Interpreter, Noun, Schema, Vocabulary};
use proptest::prelude::*;

struct Setup {
    interpreter: Interpreter,
    player: EntityId,
    villager: EntityId,
    apple: EntityId,
    rock: EntityId,
    gate: EntityId,
    key: EntityId,
}

impl Setup {
    fn validate(&self, verb: &str, schema: &Schema) -> Result<(), CommandError> {
        let action = self.interpreter.vocabulary().verb_id(verb).unwrap();
        self.interpreter.validate(action, schema)
    }
}

fn setup() -> Setup {
    let mut vocab = Vocabulary::new();
    for action in [
        Action::builder("give")
            .with_direct_object(Role::Theme)
            .with_indirect_object(Role::Patient)
            .with_preposition("to", Role::Patient)
            .with_required(&[Role::Patient, Role::Theme])
            .with_message(Role::Patient, "The {} has no use for gifts"),
        Action::builder("unlock")
            .with_direct_object(Role::Patient)
            .with_preposition("with", Role::Instrument)
            .with_required(&[Role::Patient, Role::Instrument]),
        Action::builder("put")
            .with_direct_object(Role::Theme)
            .with_preposition("in", Role::Patient)
            .with_preposition("into", Role::Patient)
            .with_preposition("on", Role::Patient)
            .with_required(&[Role::Patient, Role::Theme]),
        Action::builder("smell")
            .with_direct_object(Role::Theme)
            .with_required(&[Role::Theme])
            .with_permissive(&[Role::Theme]),
        Action::builder("wait"),
    ] {
        vocab.register_action(action.build().unwrap()).unwrap();
    }
    let player = vocab
        .register_noun(Noun::builder("player").legal_for_any(Role::Agent))
        .unwrap();
    let villager = vocab
        .register_noun(Noun::builder("villager").legal_for(Role::Patient, "give"))
        .unwrap();
    let apple = vocab
        .register_noun(
            Noun::builder("apple")
                .with_modifier("red")
                .legal_for(Role::Theme, "give")
                .legal_for(Role::Theme, "put"),
        )
        .unwrap();
    let rock = vocab.register_noun(Noun::builder("rock")).unwrap();
    let gate = vocab
        .register_noun(Noun::builder("gate").legal_for(Role::Patient, "unlock"))
        .unwrap();
    let key = vocab
        .register_noun(Noun::builder("key").legal_for(Role::Instrument, "unlock"))
        .unwrap();

    Setup {
        interpreter: Interpreter::new(vocab),
        player,
        villager,
        apple,
        rock,
        gate,
        key,
    }
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn unreachable_required_role_fails_construction() {
    let err = Action::builder("unlock")
        .with_direct_object(Role::Patient)
        .with_required(&[Role::Patient, Role::Instrument])
        .build()
        .unwrap_err();
    let ErrorKind::InvalidRoleConfiguration {
        action,
        required_unassigned,
    } = err.kind
    else {
        panic!("expected an invalid role configuration");
    };
    assert_eq!(action, "unlock");
    assert_eq!(required_unassigned, RoleSet::of(&[Role::Instrument]));
}

#[test]
fn legality_grant_for_unknown_verb_fails() {
    let mut vocab = Vocabulary::new();
    let err = vocab
        .register_noun(Noun::builder("apple").legal_for(Role::Theme, "juggle"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownVerb(_)));
}

#[test]
fn duplicate_verbs_are_rejected() {
    let mut vocab = Vocabulary::new();
    vocab
        .register_action(Action::builder("get").build().unwrap())
        .unwrap();
    let err = vocab
        .register_action(Action::builder("take").with_aliases(&["get"]).build().unwrap())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateVerb(_)));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn complete_schema_passes() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Patient, s.villager)
        .with(Role::Theme, s.apple);
    assert_eq!(s.validate("give", &schema), Ok(()));
}

#[test]
fn unwired_role_is_not_understood() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Theme, s.apple);
    assert_eq!(s.validate("wait", &schema), Err(CommandError::NotUnderstood));
}

#[test]
fn first_illegal_role_wins() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Patient, s.rock)
        .with(Role::Theme, s.rock);
    let err = s.validate("give", &schema).unwrap_err();
    assert_eq!(
        err,
        CommandError::SemanticRole {
            role: Role::Patient,
            entity: s.rock,
            message: "The rock has no use for gifts".into(),
        }
    );
}

#[test]
fn default_role_message_names_entity() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Patient, s.villager)
        .with(Role::Theme, s.rock);
    assert_eq!(
        s.validate("give", &schema).unwrap_err().to_string(),
        "That is not the kind of thing you do with a rock"
    );
}

#[test]
fn permissive_roles_skip_legality() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Theme, s.rock);
    assert_eq!(s.validate("smell", &schema), Ok(()));
}

#[test]
fn missing_patient_question() {
    let s = setup();
    let schema = Schema::new().with(Role::Agent, s.player);
    let err = s.validate("unlock", &schema).unwrap_err();
    assert_eq!(err.to_string(), "What do you want to unlock with?");
    let CommandError::MissingRole { missing, .. } = err else {
        panic!("expected a missing role");
    };
    assert_eq!(missing, RoleSet::of(&[Role::Patient, Role::Instrument]));
}

#[test]
fn shared_role_asks_with_last_preposition() {
    let s = setup();
    let alone = Schema::new().with(Role::Agent, s.player);
    assert_eq!(
        s.validate("put", &alone).unwrap_err().to_string(),
        "What do you want to put on?"
    );

    let err = s.validate("put", &alone.with(Role::Theme, s.apple)).unwrap_err();
    assert_eq!(err.to_string(), "What do you want to put on?");
    let CommandError::MissingRole { missing, .. } = err else {
        panic!("expected a missing role");
    };
    assert_eq!(missing, RoleSet::of(&[Role::Patient]));
}

#[test]
fn missing_theme_question_names_patient() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Patient, s.villager);
    assert_eq!(
        s.validate("give", &schema).unwrap_err().to_string(),
        "What do you want to give the villager?"
    );
}

#[test]
fn missing_instrument_question_names_patient() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Patient, s.gate);
    assert_eq!(
        s.validate("unlock", &schema).unwrap_err().to_string(),
        "What do you want to unlock the gate with?"
    );
}

#[test]
fn illegal_patient_beats_missing_instrument() {
    let s = setup();
    let schema = Schema::new()
        .with(Role::Agent, s.player)
        .with(Role::Patient, s.key);
    assert_eq!(
        s.validate("unlock", &schema).unwrap_err().to_string(),
        "You can't do that to the key"
    );
}

#[test]
fn missing_agent_only_is_not_understood() {
    let s = setup();
    assert_eq!(
        s.validate("wait", &Schema::new()),
        Err(CommandError::NotUnderstood)
    );
}

proptest! {
    /// Validating twice gives the same answer and changes nothing.
    #[test]
    fn validation_is_idempotent(
        verb in prop::sample::select(vec!["give", "unlock", "smell", "wait"]),
        slots in prop::array::uniform5(prop::option::of(0usize..6)),
    ) {
        let s = setup();
        let entities = [s.player, s.villager, s.apple, s.rock, s.gate, s.key];
        let mut schema = Schema::new();
        for (role, slot) in Role::ALL.into_iter().zip(slots) {
            if let Some(index) = slot {
                schema.set(role, entities[index]);
            }
        }
        let before = schema;
        let first = s.validate(verb, &schema);
        let second = s.validate(verb, &schema);
        prop_assert_eq!(first, second);
        prop_assert_eq!(schema, before);
    }
}
