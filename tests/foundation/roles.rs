//! Integration tests for roles, scopes and role sets

use casebook_foundation::{Role, RoleSet, Scope};
use proptest::prelude::*;

// =============================================================================
// Roles
// =============================================================================

#[test]
fn roles_iterate_in_fixed_order() {
    assert_eq!(
        Role::ALL,
        [Role::Agent, Role::Patient, Role::Theme, Role::Goal, Role::Instrument]
    );
    let names: Vec<String> = Role::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["agent", "patient", "theme", "goal", "instrument"]);
}

#[test]
fn scope_defaults_to_nearby() {
    assert_eq!(Scope::default(), Scope::Nearby);
}

// =============================================================================
// Role Sets
// =============================================================================

#[test]
fn role_set_iterates_in_role_order() {
    let set = RoleSet::of(&[Role::Instrument, Role::Agent, Role::Theme]);
    assert_eq!(
        set.iter().collect::<Vec<_>>(),
        vec![Role::Agent, Role::Theme, Role::Instrument]
    );
}

#[test]
fn role_set_empty_and_all() {
    assert!(RoleSet::empty().is_empty());
    assert_eq!(RoleSet::all().iter().count(), 5);
    assert_eq!(format!("{}", RoleSet::empty()), "{}");
}

#[test]
fn role_set_extend() {
    let mut set = RoleSet::of(&[Role::Agent]);
    set.extend([Role::Goal, Role::Agent]);
    assert_eq!(set, RoleSet::of(&[Role::Agent, Role::Goal]));
}

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

proptest! {
    #[test]
    fn role_set_matches_vec_semantics(roles in prop::collection::vec(role(), 0..8)) {
        let set = RoleSet::of(&roles);
        for r in Role::ALL {
            prop_assert_eq!(set.contains(r), roles.contains(&r));
        }
    }

    #[test]
    fn intersection_is_commutative(
        a in prop::collection::vec(role(), 0..5),
        b in prop::collection::vec(role(), 0..5),
    ) {
        let (a, b) = (RoleSet::of(&a), RoleSet::of(&b));
        prop_assert_eq!(a.intersection(b), b.intersection(a));
        for r in a.intersection(b).iter() {
            prop_assert!(a.contains(r) && b.contains(r));
        }
    }
}
