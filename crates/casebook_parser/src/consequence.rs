//! Consequence table.
//!
//! A per-action override table keyed by the exact role bindings, the
//! actor's location and the outcome verdict. Matching is exact: a slot
//! left empty at registration only matches a command that leaves it empty
//! too. There are no wildcards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use casebook_foundation::{EntityId, Outcome};
use tracing::debug;

use crate::action::Scene;
use crate::schema::Schema;

/// Side effect run when a consequence fires. May produce a replacement
/// outcome.
pub type ConsequenceEffect = Arc<dyn Fn(&Schema, &mut Scene<'_>) -> Option<Outcome> + Send + Sync>;

/// Exact-match key for a consequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConsequenceKey {
    /// Every role slot, empty ones included.
    pub roles: [Option<EntityId>; 5],
    /// Where the actor must be, if anywhere in particular.
    pub location: Option<EntityId>,
    /// Verdict the action must have produced.
    pub verdict: Option<bool>,
}

impl ConsequenceKey {
    /// Builds a key.
    #[must_use]
    pub fn new(schema: &Schema, verdict: Option<bool>, location: Option<EntityId>) -> Self {
        Self {
            roles: schema.slots(),
            location,
            verdict,
        }
    }
}

/// One registered entry: an optional effect and an optional override.
#[derive(Clone)]
pub struct Consequence {
    effect: Option<ConsequenceEffect>,
    result: Option<Outcome>,
}

impl fmt::Debug for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consequence")
            .field("effect", &self.effect.as_ref().map(|_| "<fn>"))
            .field("result", &self.result)
            .finish()
    }
}

/// A consequence waiting to be registered on an action.
#[derive(Clone, Debug)]
pub struct ConsequenceRule {
    schema: Schema,
    verdict: Option<bool>,
    location: Option<EntityId>,
    consequence: Consequence,
}

impl ConsequenceRule {
    /// Starts a rule matching exactly these role bindings.
    #[must_use]
    pub fn when(schema: Schema) -> Self {
        Self {
            schema,
            verdict: None,
            location: None,
            consequence: Consequence {
                effect: None,
                result: None,
            },
        }
    }

    /// Only fire when the action succeeded.
    #[must_use]
    pub fn on_success(self) -> Self {
        self.on_verdict(Some(true))
    }

    /// Only fire when the action failed.
    #[must_use]
    pub fn on_failure(self) -> Self {
        self.on_verdict(Some(false))
    }

    /// Sets the required verdict. `None` matches neutral outcomes only.
    #[must_use]
    pub fn on_verdict(mut self, verdict: Option<bool>) -> Self {
        self.verdict = verdict;
        self
    }

    /// Only fire when the actor is in this location.
    #[must_use]
    pub fn at(mut self, location: EntityId) -> Self {
        self.location = Some(location);
        self
    }

    /// Runs an effect when the rule fires.
    #[must_use]
    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&Schema, &mut Scene<'_>) -> Option<Outcome> + Send + Sync + 'static,
    {
        self.consequence.effect = Some(Arc::new(effect));
        self
    }

    /// Replaces the action's outcome when the rule fires.
    #[must_use]
    pub fn with_result(mut self, outcome: Outcome) -> Self {
        self.consequence.result = Some(outcome);
        self
    }

    /// The key this rule registers under.
    #[must_use]
    pub fn key(&self) -> ConsequenceKey {
        ConsequenceKey::new(&self.schema, self.verdict, self.location)
    }
}

/// Registered consequences of one action.
#[derive(Clone, Debug, Default)]
pub struct ConsequenceTable {
    entries: HashMap<ConsequenceKey, Vec<Consequence>>,
}

impl ConsequenceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule under its key.
    pub fn register(&mut self, rule: ConsequenceRule) {
        let key = rule.key();
        self.entries.entry(key).or_default().push(rule.consequence);
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching a command, preferring the location-specific key
    /// and falling back to the location-agnostic one.
    #[must_use]
    pub fn lookup(
        &self,
        schema: &Schema,
        verdict: Option<bool>,
        location: Option<EntityId>,
    ) -> Option<&[Consequence]> {
        self.entries
            .get(&ConsequenceKey::new(schema, verdict, location))
            .or_else(|| self.entries.get(&ConsequenceKey::new(schema, verdict, None)))
            .map(Vec::as_slice)
    }

    /// Runs the matching entries in registration order.
    ///
    /// Each entry's effect runs for its side effects; the entry's result
    /// is its override if it has one, otherwise whatever the effect
    /// returned. Later entries overwrite earlier ones.
    pub fn apply(
        &self,
        schema: &Schema,
        verdict: Option<bool>,
        location: Option<EntityId>,
        scene: &mut Scene<'_>,
    ) -> Option<Outcome> {
        let entries = self.lookup(schema, verdict, location)?;
        debug!(?schema, ?verdict, ?location, count = entries.len(), "consequences matched");

        let mut result = None;
        for entry in entries {
            let produced = entry.effect.as_ref().and_then(|effect| effect(schema, scene));
            result = entry.result.clone().or(produced);
        }
        result
    }
}
