//! Integration tests for Error types
//!
//! Tests error construction, display and error kinds.

use casebook_foundation::{ActionId, EntityId, Error, ErrorKind, Role, RoleSet};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_roles() {
    let err = Error::invalid_roles("unlock", RoleSet::of(&[Role::Instrument, Role::Goal]));
    assert!(matches!(err.kind, ErrorKind::InvalidRoleConfiguration { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("unlock"));
    assert!(msg.contains("{goal, instrument}"));
}

#[test]
fn error_unknown_verb() {
    let err = Error::unknown_verb("frobnicate");
    assert!(matches!(err.kind, ErrorKind::UnknownVerb(_)));
    assert!(format!("{err}").contains("frobnicate"));
}

#[test]
fn error_duplicate_verb() {
    let err = Error::duplicate_verb("take");
    assert!(matches!(err.kind, ErrorKind::DuplicateVerb(_)));
    assert!(format!("{err}").contains("take"));
}

#[test]
fn error_unknown_entity() {
    let err = Error::unknown_entity(EntityId::new(42));
    assert!(matches!(err.kind, ErrorKind::UnknownEntity(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn error_unknown_action() {
    let err = Error::unknown_action(ActionId::new(7));
    assert!(matches!(err.kind, ErrorKind::UnknownAction(_)));
    assert!(format!("{err}").contains('7'));
}

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::unknown_verb("x"));
}
