//! Syntax tests.
//!
//! Tests for turning raw input into a parsed command.

use casebook_foundation::Role;
use casebook_parser::tokenizer::TokenClass;
use casebook_parser::{
    Action, Noun, NounPhrase, ParsedCommand, SyntaxError, SyntaxParser, Vocabulary,
};

fn vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::new();
    for action in [
        Action::builder("give")
            .with_aliases(&["offer"])
            .with_direct_object(Role::Theme)
            .with_indirect_object(Role::Patient)
            .with_preposition("to", Role::Patient),
        Action::builder("eat").with_direct_object(Role::Theme),
        Action::builder("look")
            .with_direct_object(Role::Theme)
            .with_preposition("at", Role::Theme),
    ] {
        vocab.register_action(action.build().unwrap()).unwrap();
    }
    for noun in [
        Noun::builder("apple").with_modifier("red"),
        Noun::builder("core").with_modifier("apple"),
        Noun::builder("villager").with_alias("peasant"),
        Noun::builder("lamp").with_modifier("brass"),
    ] {
        vocab.register_noun(noun).unwrap();
    }
    vocab
}

fn parse(input: &str) -> Result<ParsedCommand, SyntaxError> {
    let vocab = vocabulary();
    SyntaxParser::new(&vocab).parse(input)
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn classification_precedence() {
    let vocab = vocabulary();
    assert_eq!(vocab.classify("the"), TokenClass::Determiner);
    assert_eq!(vocab.classify("to"), TokenClass::Preposition);
    assert_eq!(vocab.classify("apple"), TokenClass::Noun);
    assert_eq!(vocab.classify("brass"), TokenClass::Adjective);
    assert_eq!(vocab.classify("offer"), TokenClass::Verb);
    assert_eq!(vocab.classify("xyzzy"), TokenClass::Unknown);
}

#[test]
fn custom_function_words() {
    let vocab = Vocabulary::new().with_function_words(&["ze"], &["avec"]);
    assert_eq!(vocab.classify("ze"), TokenClass::Determiner);
    assert_eq!(vocab.classify("avec"), TokenClass::Preposition);
    assert_eq!(vocab.classify("the"), TokenClass::Unknown);
}

// =============================================================================
// Phrases
// =============================================================================

#[test]
fn verb_alias_and_case() {
    let parsed = parse("OFFER the Apple TO villager").unwrap();
    assert_eq!(parsed.verb, "offer");
    assert_eq!(parsed.direct_object, Some(NounPhrase::new("apple")));
    assert_eq!(parsed.prep_phrases.len(), 1);
    assert_eq!(parsed.prep_phrases[0].preposition, "to");
    assert_eq!(parsed.prep_phrases[0].phrase, NounPhrase::new("villager"));
}

#[test]
fn modifiers_attach_to_next_noun() {
    let parsed = parse("look at the brass lamp").unwrap();
    assert_eq!(parsed.direct_object, None);
    assert_eq!(
        parsed.prep_phrases[0].phrase,
        NounPhrase::new("lamp").with_modifier("brass")
    );
}

#[test]
fn ditransitive_demotes_first_noun() {
    let parsed = parse("give peasant red apple").unwrap();
    assert_eq!(parsed.indirect_object, Some(NounPhrase::new("peasant")));
    assert_eq!(
        parsed.direct_object,
        Some(NounPhrase::new("apple").with_modifier("red"))
    );
}

#[test]
fn compound_noun_folds_first_noun() {
    let parsed = parse("eat red apple core").unwrap();
    assert_eq!(parsed.indirect_object, None);
    assert_eq!(
        parsed.direct_object,
        Some(NounPhrase::new("core").with_modifier("apple").with_modifier("red"))
    );
}

#[test]
fn indirect_object_checked_before_compound() {
    // "apple" is also an adjective, but give takes an indirect object.
    let parsed = parse("give apple core").unwrap();
    assert_eq!(parsed.indirect_object, Some(NounPhrase::new("apple")));
    assert_eq!(parsed.direct_object, Some(NounPhrase::new("core")));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn syntax_failures() {
    assert_eq!(parse(""), Err(SyntaxError::Empty));
    assert_eq!(parse("dance"), Err(SyntaxError::UnknownVerb("dance".into())));
    assert_eq!(parse("eat xyzzy"), Err(SyntaxError::UnknownWord("xyzzy".into())));
    assert!(matches!(parse("eat the a apple"), Err(SyntaxError::DuplicateDeterminer(_))));
    assert!(matches!(
        parse("give apple to to villager"),
        Err(SyntaxError::DuplicatePreposition(_))
    ));
}

#[test]
fn unattachable_second_noun_keeps_the_first() {
    let parsed = parse("eat lamp villager").unwrap();
    assert_eq!(parsed.direct_object, Some(NounPhrase::new("lamp")));
    assert_eq!(parsed.indirect_object, None);
}

#[test]
fn failure_messages() {
    assert_eq!(parse("").unwrap_err().to_string(), "Say something");
    assert_eq!(parse("dance").unwrap_err().to_string(), "I don't know how to dance!");
    assert_eq!(
        parse("eat xyzzy").unwrap_err().to_string(),
        "Sorry, I don't know what you mean by 'xyzzy'"
    );
    assert_eq!(
        parse("eat the the apple").unwrap_err().to_string(),
        "Sorry, I didn't understand that"
    );
}
