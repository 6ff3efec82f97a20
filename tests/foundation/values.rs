//! Integration tests for identifiers, traits and outcomes

use casebook_foundation::{EntityId, Outcome, Trait, Traits};

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn entity_id_formatting() {
    let id = EntityId::new(7);
    assert_eq!(format!("{id}"), "#7");
    assert_eq!(format!("{id:?}"), "EntityId(7)");
    assert_eq!(id.index(), 7);
}

// =============================================================================
// Traits
// =============================================================================

#[test]
fn traits_membership() {
    let traits = Traits::of(&[Trait::Ubiquitous, Trait::Portable]);
    assert!(traits.is_ubiquitous());
    assert!(!traits.is_composite());
    assert!(traits.has(Trait::Portable));
    assert!(!traits.without(Trait::Portable).has(Trait::Portable));
    assert!(Traits::none().with(Trait::Composite).is_composite());
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn outcome_verdicts() {
    assert_eq!(Outcome::success("yes").verdict(), Some(true));
    assert_eq!(Outcome::failure("no").verdict(), Some(false));
    assert_eq!(Outcome::neutral("meh").verdict(), None);
}

#[test]
fn outcome_variants_wrap() {
    let outcome = Outcome::success("Wheeeeeee!").with_variant("Boing boing boing ...");
    assert_eq!(outcome.messages().len(), 2);
    assert_eq!(outcome.variant(0), "Wheeeeeee!");
    assert_eq!(outcome.variant(1), "Boing boing boing ...");
    assert_eq!(outcome.variant(2), "Wheeeeeee!");
    assert_eq!(outcome.message(), "Wheeeeeee!");
}

#[test]
fn outcome_append_and_replace() {
    let mut outcome = Outcome::success("You are carrying:");
    outcome.append("\n\ta golden key");
    assert_eq!(outcome.to_string(), "You are carrying:\n\ta golden key");
    outcome.set_message("You're not carrying anything");
    assert_eq!(outcome.message(), "You're not carrying anything");
}
